//! Glint Decode
//!
//! Header-only image probing for Glint.
//!
//! This crate implements the `glint_core::HeaderDecoder` seam on top of the
//! `image` codec family. An open reads just far enough into the container to
//! answer structural questions:
//! - Container format detection (magic-byte guess)
//! - Pixel-grid dimensions, color type, and band count
//! - Embedded EXIF and ICC blobs
//! - EXIF orientation (1-8)
//! - Container pixel density (JPEG JFIF, PNG pHYs)
//!
//! # Example
//!
//! ```rust,no_run
//! use glint_core::{AccessHint, HeaderDecoder, ImageSource};
//! use glint_decode::ImageEngine;
//! use std::path::PathBuf;
//! # fn example() -> glint_core::Result<()> {
//! let engine = ImageEngine::new();
//! let source = ImageSource::Path(PathBuf::from("/photos/cat.jpg"));
//! let (header, kind) = engine.open_header(&source, AccessHint::Sequential)?;
//! println!("{} {}x{}", kind, header.width(), header.height());
//! # Ok(())
//! # }
//! ```

mod density;
mod engine;
mod error;
mod orientation;

pub use engine::ImageEngine;
pub use error::{DecodeError, Result};
