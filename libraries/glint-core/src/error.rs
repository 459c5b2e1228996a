/// Core error types for Glint
use thiserror::Error;

/// Result type alias using `GlintError`
pub type Result<T> = std::result::Result<T, GlintError>;

/// Core error type for Glint
#[derive(Error, Debug)]
pub enum GlintError {
    /// Invalid or missing request input
    #[error("Input error: {0}")]
    Input(String),

    /// Decode engine rejected or could not parse the data
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl GlintError {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an uncategorized error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
