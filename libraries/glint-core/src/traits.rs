/// Core traits for Glint
use crate::error::Result;
use crate::types::{AccessHint, ImageKind, ImageSource};

/// An opened image header
///
/// Accessor surface over a header-only open: no pixel data is reachable
/// through this handle. Blob accessors borrow from the handle; callers that
/// need the bytes past the handle's lifetime copy them out.
pub trait ImageHeader: Send {
    /// Pixel-grid width
    fn width(&self) -> u32;

    /// Pixel-grid height
    fn height(&self) -> u32;

    /// Colorspace name (e.g. "srgb", "b-w")
    fn color_space(&self) -> &str;

    /// Number of bands, including any alpha band
    fn channels(&self) -> u32;

    /// Whether the container carries pixel density metadata
    fn has_density(&self) -> bool;

    /// Pixel density in DPI; meaningful only when `has_density` is true
    fn density(&self) -> u32;

    /// Whether an embedded ICC color profile is present
    fn has_profile(&self) -> bool;

    /// Whether the band layout includes an alpha channel
    fn has_alpha(&self) -> bool;

    /// EXIF orientation tag value (1-8), or 0 when absent
    fn orientation(&self) -> u8;

    /// Raw EXIF block, when attached
    fn exif(&self) -> Option<&[u8]>;

    /// Raw ICC profile block, when attached
    fn icc(&self) -> Option<&[u8]>;
}

/// Header-only decode engine
///
/// Implementers open an image source far enough to answer structural
/// questions (dimensions, bands, embedded blobs) without decoding pixels.
///
/// Opening may block on file I/O; callers are expected to run it on a
/// blocking-capable worker thread, never on an async executor thread.
pub trait HeaderDecoder: Send + Sync {
    /// Open the image header and detect the container format
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or the header cannot
    /// be parsed
    fn open_header(
        &self,
        source: &ImageSource,
        access: AccessHint,
    ) -> Result<(Box<dyn ImageHeader>, ImageKind)>;
}
