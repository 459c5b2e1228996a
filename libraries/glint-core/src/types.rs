/// Image domain types
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where the encoded image bytes come from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image file on disk
    Path(PathBuf),

    /// Encoded image bytes held in memory
    ///
    /// `Bytes` handles are reference-counted; cloning shares the same
    /// backing allocation, which is what keeps caller buffers alive while
    /// a background task reads from them.
    Buffer(Bytes),
}

/// How the decode engine is expected to traverse the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessHint {
    /// Single linear pass over the input
    #[default]
    Sequential,

    /// Arbitrary-region access
    Random,
}

/// Detected image container format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// JPEG / JFIF
    Jpeg,
    /// Portable Network Graphics
    Png,
    /// WebP
    WebP,
    /// GIF
    Gif,
    /// TIFF
    Tiff,
    /// Windows bitmap
    Bmp,
    /// Windows icon
    Ico,
    /// AVIF
    Avif,
    /// Radiance HDR
    Hdr,
    /// OpenEXR
    OpenExr,
    /// Netpbm family
    Pnm,
    /// DirectDraw surface
    Dds,
    /// Truevision TGA
    Tga,
    /// Quite OK Image
    Qoi,
    /// Farbfeld
    Farbfeld,
    /// Opened but not a recognized container
    Unknown,
}

impl ImageKind {
    /// Short format identifier as surfaced in metadata results
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Gif => "gif",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
            Self::Ico => "ico",
            Self::Avif => "avif",
            Self::Hdr => "hdr",
            Self::OpenExr => "exr",
            Self::Pnm => "pnm",
            Self::Dds => "dds",
            Self::Tga => "tga",
            Self::Qoi => "qoi",
            Self::Farbfeld => "farbfeld",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the container was not recognized
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural metadata extracted from an image header
///
/// Always-present fields describe the pixel grid; optional fields are only
/// populated when the container actually carries them, and stay out of the
/// serialized form otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Container format identifier (e.g. "jpeg", "png")
    pub format: String,

    /// Pixel-grid width
    pub width: u32,

    /// Pixel-grid height
    pub height: u32,

    /// Colorspace name (e.g. "srgb", "b-w")
    pub space: String,

    /// Number of bands, including any alpha band
    pub channels: u32,

    /// Pixel density in DPI, when the container carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<u32>,

    /// Whether an embedded ICC color profile is present
    pub has_profile: bool,

    /// Whether the band layout includes an alpha channel
    pub has_alpha: bool,

    /// EXIF orientation tag (1-8), when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<u8>,

    /// Raw EXIF block, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exif: Option<Vec<u8>>,

    /// Raw ICC profile block, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icc: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_metadata() -> ImageMetadata {
        ImageMetadata {
            format: "png".to_string(),
            width: 4,
            height: 3,
            space: "srgb".to_string(),
            channels: 3,
            density: None,
            has_profile: false,
            has_alpha: false,
            orientation: None,
            exif: None,
            icc: None,
        }
    }

    #[test]
    fn kind_identifiers() {
        assert_eq!(ImageKind::Jpeg.as_str(), "jpeg");
        assert_eq!(ImageKind::OpenExr.to_string(), "exr");
        assert!(ImageKind::Unknown.is_unknown());
        assert!(!ImageKind::Png.is_unknown());
    }

    #[test]
    fn absent_fields_stay_out_of_serialized_form() {
        let json = serde_json::to_string(&minimal_metadata()).unwrap();
        assert!(!json.contains("density"));
        assert!(!json.contains("orientation"));
        assert!(!json.contains("exif"));
        assert!(!json.contains("icc"));
        assert!(json.contains("has_alpha"));
    }

    #[test]
    fn present_fields_round_trip() {
        let mut metadata = minimal_metadata();
        metadata.density = Some(300);
        metadata.orientation = Some(6);
        metadata.exif = Some(vec![1, 2, 3]);

        let json = serde_json::to_string(&metadata).unwrap();
        let back: ImageMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }
}
