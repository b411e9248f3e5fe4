//! Export orchestration: reads the source, renders it into a detached
//! container, rasterizes vector nodes, inlines styles, and writes the
//! serialized result to the clipboard, all behind a single error boundary
//! with unconditional cleanup.

use std::sync::OnceLock;

use regex::Regex;

use crate::dom::Element;
use crate::error::Result;
use crate::inline::{inline_styles, StyleResolver};
use crate::platform::device::effective_scale;
use crate::platform::{ClipboardWriter, PixelRatioSource, SourceProvider};
use crate::rasterize::{rasterize_vectors, RasterEngine};
use crate::render::{MarkdownRenderer, RenderScope};
use crate::{ClipboardPayload, ExportConfig, ExportOutcome};

/// Coordinates one export operation per call. The capabilities are injected
/// at construction; the exporter itself holds no per-export state, so a
/// single instance serves any number of sequential exports.
pub struct Exporter {
    config: ExportConfig,
    source: Box<dyn SourceProvider>,
    renderer: Box<dyn MarkdownRenderer>,
    resolver: Box<dyn StyleResolver>,
    raster: Box<dyn RasterEngine>,
    clipboard: Box<dyn ClipboardWriter>,
    device: Box<dyn PixelRatioSource>,
}

impl Exporter {
    /// Wires an exporter from explicit capability implementations.
    /// Validates the configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: ExportConfig,
        source: Box<dyn SourceProvider>,
        renderer: Box<dyn MarkdownRenderer>,
        resolver: Box<dyn StyleResolver>,
        raster: Box<dyn RasterEngine>,
        clipboard: Box<dyn ClipboardWriter>,
        device: Box<dyn PixelRatioSource>,
    ) -> Result<Self> {
        if config.pixel_ratio.is_nan() || config.pixel_ratio < 0.0 {
            return Err(crate::error::Error::Config(format!(
                "pixel ratio must be zero or positive, got {}",
                config.pixel_ratio
            )));
        }
        Ok(Exporter {
            config,
            source,
            renderer,
            resolver,
            raster,
            clipboard,
            device,
        })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Copies `document` to the clipboard as HTML. This is the single entry
    /// point: without an active document nothing runs; every pipeline
    /// failure is caught here, logged, and reported as the generic failure
    /// outcome. Exactly one terminal outcome is returned.
    pub async fn copy_as_html(&self, document: Option<&str>) -> ExportOutcome {
        let Some(document) = document else {
            log::debug!("copy requested without an active document");
            return ExportOutcome::NoActiveDocument;
        };
        match self.export(document).await {
            Ok(()) => ExportOutcome::Copied,
            Err(err) => {
                log::error!("copy as HTML failed for {document}: {err}");
                ExportOutcome::Failed
            }
        }
    }

    async fn export(&self, document: &str) -> Result<()> {
        let source = self.source.read(document).await?;
        let body = strip_front_matter(&source);

        // The container and scope live only for this export; both are
        // released on every exit path below, including the error returns.
        let mut container = Element::new("div");
        let scope = RenderScope::new();

        self.renderer
            .render(body, &mut container, document, &scope)
            .await?;

        let scale = effective_scale(&self.device.metrics());
        rasterize_vectors(&mut container, self.raster.as_ref(), scale).await;
        inline_styles(&mut container, self.resolver.as_ref());

        let payload = ClipboardPayload {
            html: container.inner_html(),
            text: body.to_string(),
        };
        self.clipboard.write(payload).await?;
        log::debug!("copied {document} to clipboard");
        Ok(())
    }
}

static FRONT_MATTER: OnceLock<Regex> = OnceLock::new();

/// Removes a single leading front-matter block delimited by `---` fences at
/// the very start of the document, if present. Best-effort single-prefix
/// strip: repeated or malformed blocks are left alone.
pub fn strip_front_matter(source: &str) -> &str {
    let pattern = FRONT_MATTER.get_or_init(|| Regex::new(r"\A---\n(?s:.*?)\n---\n?").unwrap());
    match pattern.find(source) {
        Some(matched) => &source[matched.end()..],
        None => source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_a_leading_front_matter_block() {
        let source = "---\ntitle: x\ntags: [a, b]\n---\n# Body\n";
        assert_eq!(strip_front_matter(source), "# Body\n");
    }

    #[test]
    fn leaves_documents_without_front_matter_verbatim() {
        let source = "# Body\n\ntext\n";
        assert_eq!(strip_front_matter(source), source);
    }

    #[test]
    fn strips_only_the_first_block() {
        let source = "---\na: 1\n---\nbody\n---\nb: 2\n---\n";
        assert_eq!(strip_front_matter(source), "body\n---\nb: 2\n---\n");
    }

    #[test]
    fn ignores_fences_that_are_not_at_the_start() {
        let source = "intro\n---\ntitle: x\n---\nbody\n";
        assert_eq!(strip_front_matter(source), source);
    }

    #[test]
    fn ignores_an_unterminated_fence() {
        let source = "---\ntitle: x\nbody\n";
        assert_eq!(strip_front_matter(source), source);
    }

    #[test]
    fn handles_a_block_closing_at_end_of_input() {
        let source = "---\ntitle: x\n---";
        assert_eq!(strip_front_matter(source), "");
    }
}
