//! Glint Core
//!
//! Platform-agnostic core types, traits, and error handling for Glint.
//!
//! This crate provides the foundational building blocks used by the decode
//! engine and the asynchronous probing layer:
//! - **Domain Types**: `ImageMetadata`, `ImageSource`, `ImageKind`, `AccessHint`
//! - **Core Traits**: `HeaderDecoder`, `ImageHeader`
//! - **Error Handling**: Unified `GlintError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use glint_core::ImageSource;
//! use std::path::PathBuf;
//!
//! // Describe an on-disk input
//! let source = ImageSource::Path(PathBuf::from("/photos/cat.jpg"));
//! assert!(matches!(source, ImageSource::Path(_)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{GlintError, Result};
pub use traits::{HeaderDecoder, ImageHeader};
pub use types::{AccessHint, ImageKind, ImageMetadata, ImageSource};
