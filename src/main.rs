use anyhow::{Context, Result};
use clap::Parser;
use clipmark::theme::ThemeRules;
use clipmark::{new_exporter, ExportConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clipmark")]
#[command(about = "Copy a rendered Markdown document to the clipboard as HTML", long_about = None)]
struct Args {
    /// Markdown document to copy
    file: Option<PathBuf>,

    /// Theme rules JSON replacing the built-in theme
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Device pixel ratio for rasterized graphics (0 = platform default)
    #[arg(long, default_value_t = 0.0)]
    pixel_ratio: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ExportConfig {
        pixel_ratio: args.pixel_ratio,
        ..ExportConfig::default()
    };
    if let Some(path) = &args.theme {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read theme rules {}", path.display()))?;
        config.theme = ThemeRules::from_json(&text)?;
    }

    let exporter = new_exporter(config)?;
    let document = args.file.map(|p| p.to_string_lossy().into_owned());
    let outcome = exporter.copy_as_html(document.as_deref()).await;

    println!("{}", outcome.notice());
    if !outcome.is_copied() {
        std::process::exit(1);
    }
    Ok(())
}
