//! Clipmark
//!
//! Converts a rendered Markdown document into clipboard-ready HTML:
//! presentation styles are inlined onto every element and embedded vector
//! graphics are rasterized to self-contained PNG payloads, so the markup
//! survives being pasted into style-stripping targets such as chat apps
//! and word processors.
//!
//! # Features
//!
//! - **Injected boundaries**: document sources, the Markdown renderer, the
//!   style resolver, the raster engine, and the clipboard are traits with
//!   feature-gated default backends; swap any of them for testing or
//!   embedding
//! - **Paste-safe output**: only a fixed allowlist of typographic
//!   properties is inlined; layout and box-model properties never leak
//!   into the payload
//! - **Fault-isolated rasterization**: vector nodes are converted one at a
//!   time and a failed node never aborts an export
//!
//! # Example
//!
//! ```no_run
//! use clipmark::{new_exporter, ExportConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let exporter = new_exporter(ExportConfig::default())?;
//! let outcome = exporter.copy_as_html(Some("notes/today.md")).await;
//! println!("{}", outcome.notice());
//! # Ok(())
//! # }
//! ```

pub mod dom;
pub mod error;
pub mod export;
pub mod inline;
pub mod platform;
pub mod rasterize;
pub mod render;
pub mod theme;

// Default raster backend (CPU rasterizer)
#[cfg(feature = "raster")]
pub mod svg_png;

pub use error::{Error, Result};
pub use export::{strip_front_matter, Exporter};

/// Configuration for the exporter
///
/// The defaults are chosen to work headlessly: an unreported pixel ratio
/// (resolved to the standard high-density fallback at rasterization time)
/// and the built-in document theme.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Device pixel ratio used to size raster surfaces. Zero means
    /// "unreported"; negative values are rejected at construction.
    pub pixel_ratio: f32,
    /// Style resolution rules for the default theme resolver.
    pub theme: theme::ThemeRules,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: 0.0,
            theme: theme::ThemeRules::standard(),
        }
    }
}

/// One clipboard entry with two representations of the same document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    /// Serialized, style-inlined, raster-converted markup.
    pub html: String,
    /// The document body (front matter stripped).
    pub text: String,
}

/// Terminal outcome of one export operation. Exactly one of these reaches
/// the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The clipboard holds the exported document.
    Copied,
    /// Precondition failure: there was no document to export.
    NoActiveDocument,
    /// The pipeline failed; details were logged.
    Failed,
}

impl ExportOutcome {
    /// The user-visible notice for this outcome.
    pub fn notice(&self) -> &'static str {
        match self {
            ExportOutcome::Copied => "Copied HTML to clipboard",
            ExportOutcome::NoActiveDocument => "No active document",
            ExportOutcome::Failed => "Copy failed, please try again",
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, ExportOutcome::Copied)
    }
}

/// Creates an exporter wired with the default backends: filesystem
/// sources, the comrak renderer, the theme resolver, the CPU raster
/// engine, and the system clipboard.
#[cfg(all(feature = "markdown", feature = "raster", feature = "clipboard"))]
pub fn new_exporter(config: ExportConfig) -> Result<Exporter> {
    let theme = config.theme.clone();
    let pixel_ratio = config.pixel_ratio;
    Exporter::new(
        config,
        Box::new(platform::FsSource::new()),
        Box::new(render::ComrakRenderer::new()),
        Box::new(theme::ThemeResolver::new(theme)),
        Box::new(svg_png::ResvgEngine::new()),
        Box::new(platform::SystemClipboard::new()),
        Box::new(platform::StaticDevice::new(pixel_ratio)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reports_no_pixel_ratio() {
        let config = ExportConfig::default();
        assert_eq!(config.pixel_ratio, 0.0);
        assert!(!config.theme.tags.is_empty());
    }

    #[test]
    fn outcome_notices_are_distinct() {
        assert_eq!(ExportOutcome::Copied.notice(), "Copied HTML to clipboard");
        assert_eq!(ExportOutcome::NoActiveDocument.notice(), "No active document");
        assert_eq!(ExportOutcome::Failed.notice(), "Copy failed, please try again");
        assert!(ExportOutcome::Copied.is_copied());
        assert!(!ExportOutcome::Failed.is_copied());
    }
}
