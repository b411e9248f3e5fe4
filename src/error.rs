//! Error types for the export pipeline

use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting a document
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the document source
    #[error("Failed to read document source: {0}")]
    Source(String),

    /// The markdown renderer failed to populate the export container
    #[error("Markdown rendering failed: {0}")]
    Render(String),

    /// A vector node could not be converted to a raster image
    #[error("Vector rasterization failed: {0}")]
    Raster(String),

    /// The clipboard entry could not be written
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Source(err.to_string())
    }
}
