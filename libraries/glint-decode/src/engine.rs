/// Header probe implementation using the `image` codec family
use crate::density;
use crate::error::DecodeError;
use crate::orientation;
use glint_core::{AccessHint, HeaderDecoder, ImageHeader, ImageKind, ImageSource};
use image::{ColorType, ImageDecoder, ImageFormat, ImageReader};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Header-only decode engine backed by the `image` crate
pub struct ImageEngine;

impl ImageEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }

    /// Probe encoded bytes without decoding pixels
    fn probe(&self, data: &[u8], access: AccessHint) -> Result<OpenedHeader, DecodeError> {
        debug!(len = data.len(), ?access, "probing image header");

        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let Some(format) = reader.format() else {
            return Err(DecodeError::UnsupportedFormat);
        };
        let kind = kind_of(format);

        let mut decoder = reader.into_decoder()?;
        let (width, height) = decoder.dimensions();
        let color = decoder.color_type();

        let icc = decoder.icc_profile().unwrap_or_else(|err| {
            warn!(%err, "failed to read ICC profile chunk");
            None
        });
        let exif = decoder.exif_metadata().unwrap_or_else(|err| {
            warn!(%err, "failed to read EXIF chunk");
            None
        });
        let orientation = exif.as_deref().map_or(0, orientation::from_exif);
        let density = density::read(data, kind);

        Ok(OpenedHeader {
            kind,
            width,
            height,
            space: space_nickname(color),
            channels: u32::from(color.channel_count()),
            density,
            has_alpha: color.has_alpha(),
            orientation,
            exif,
            icc,
        })
    }
}

impl Default for ImageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderDecoder for ImageEngine {
    fn open_header(
        &self,
        source: &ImageSource,
        access: AccessHint,
    ) -> glint_core::Result<(Box<dyn ImageHeader>, ImageKind)> {
        let header = match source {
            ImageSource::Path(path) => {
                let data = read_file(path)?;
                self.probe(&data, access)?
            }
            ImageSource::Buffer(buffer) => self.probe(buffer, access)?,
        };
        let kind = header.kind;
        Ok((Box::new(header), kind))
    }
}

/// Read an image file fully into memory
///
/// Header fields can sit anywhere before the pixel stream (EXIF, ICC, and
/// density chunks are not at fixed offsets), so the whole encoded file is
/// loaded and probed as a buffer. No pixel decode happens either way.
fn read_file(path: &Path) -> Result<Vec<u8>, DecodeError> {
    if !path.exists() {
        return Err(DecodeError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read(path)?)
}

fn kind_of(format: ImageFormat) -> ImageKind {
    match format {
        ImageFormat::Jpeg => ImageKind::Jpeg,
        ImageFormat::Png => ImageKind::Png,
        ImageFormat::WebP => ImageKind::WebP,
        ImageFormat::Gif => ImageKind::Gif,
        ImageFormat::Tiff => ImageKind::Tiff,
        ImageFormat::Bmp => ImageKind::Bmp,
        ImageFormat::Ico => ImageKind::Ico,
        ImageFormat::Avif => ImageKind::Avif,
        ImageFormat::Hdr => ImageKind::Hdr,
        ImageFormat::OpenExr => ImageKind::OpenExr,
        ImageFormat::Pnm => ImageKind::Pnm,
        ImageFormat::Dds => ImageKind::Dds,
        ImageFormat::Tga => ImageKind::Tga,
        ImageFormat::Qoi => ImageKind::Qoi,
        ImageFormat::Farbfeld => ImageKind::Farbfeld,
        _ => ImageKind::Unknown,
    }
}

/// Colorspace nicknames matching the interpretation names callers expect
fn space_nickname(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 | ColorType::La8 => "b-w",
        ColorType::L16 | ColorType::La16 => "grey16",
        ColorType::Rgb16 | ColorType::Rgba16 => "rgb16",
        ColorType::Rgb32F | ColorType::Rgba32F => "scrgb",
        _ => "srgb",
    }
}

/// Opened header state captured by a probe
struct OpenedHeader {
    kind: ImageKind,
    width: u32,
    height: u32,
    space: &'static str,
    channels: u32,
    density: Option<u32>,
    has_alpha: bool,
    orientation: u8,
    exif: Option<Vec<u8>>,
    icc: Option<Vec<u8>>,
}

impl ImageHeader for OpenedHeader {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_space(&self) -> &str {
        self.space
    }

    fn channels(&self) -> u32 {
        self.channels
    }

    fn has_density(&self) -> bool {
        self.density.is_some()
    }

    fn density(&self) -> u32 {
        self.density.unwrap_or(0)
    }

    fn has_profile(&self) -> bool {
        self.icc.is_some()
    }

    fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    fn orientation(&self) -> u8 {
        self.orientation
    }

    fn exif(&self) -> Option<&[u8]> {
        self.exif.as_deref()
    }

    fn icc(&self) -> Option<&[u8]> {
        self.icc.as_deref()
    }
}
