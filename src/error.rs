//! Error types for bookparse library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bookparse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Document-level errors.
///
/// Problems confined to a single layout object (an unsavable image, a
/// container nested too deeply) never surface here; they are recorded as
/// [`PageIssue`](crate::model::PageIssue)s on the page they occurred on.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be opened or read.
    #[error("Could not open or read document {}: {source}", .path.display())]
    DocumentUnavailable {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The decoded layout could not be understood.
    #[error("Invalid layout data: {0}")]
    InvalidLayout(String),

    /// The provided password is missing or incorrect.
    #[error("Invalid password")]
    InvalidPassword,

    /// Error storing an extracted image.
    #[error("Image extraction error: {0}")]
    ImageExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Rejected configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering (markup, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidLayout(err.to_string())
    }
}
