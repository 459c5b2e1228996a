/// Decode-engine errors
use thiserror::Error;

/// Result type alias using `DecodeError`
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Decode-engine error types
#[derive(Error, Debug)]
pub enum DecodeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Container format was not recognized
    #[error("Unsupported image format")]
    UnsupportedFormat,

    /// Header parsing error
    #[error("Header parsing error: {0}")]
    ParseError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Codec error
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl From<DecodeError> for glint_core::GlintError {
    fn from(err: DecodeError) -> Self {
        glint_core::GlintError::decode(err.to_string())
    }
}
