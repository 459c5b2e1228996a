/// Container pixel-density readers
///
/// The codec crates surface dimensions and embedded blobs but not density;
/// it lives in fixed container structures instead (JPEG JFIF APP0, PNG
/// pHYs). These readers walk the container segments directly and stop at
/// the pixel stream.
use glint_core::ImageKind;

/// Read the container's pixel density in DPI, when it carries one
pub(crate) fn read(data: &[u8], kind: ImageKind) -> Option<u32> {
    match kind {
        ImageKind::Jpeg => jfif_density(data),
        ImageKind::Png => phys_density(data),
        _ => None,
    }
}

/// JFIF APP0: units byte then X/Y density, big-endian
///
/// Unit 1 is dots per inch, unit 2 dots per centimetre, unit 0 carries an
/// aspect ratio only and reports no density.
fn jfif_density(data: &[u8]) -> Option<u32> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 4 <= data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        // Start of scan: no JFIF segment ahead of the pixel data
        if marker == 0xDA {
            return None;
        }
        let len = usize::from(u16::from_be_bytes([data[i + 2], data[i + 3]]));
        if len < 2 || i + 2 + len > data.len() {
            return None;
        }
        if marker == 0xE0 {
            let seg = &data[i + 4..i + 2 + len];
            if seg.len() >= 12 && &seg[..5] == b"JFIF\0" {
                let units = seg[7];
                let x = u32::from(u16::from_be_bytes([seg[8], seg[9]]));
                return match units {
                    1 if x > 0 => Some(x),
                    2 if x > 0 => Some(cm_to_inch(x)),
                    _ => None,
                };
            }
        }
        i += 2 + len;
    }
    None
}

/// PNG pHYs: pixels per unit X/Y then a unit byte (1 = metre)
fn phys_density(data: &[u8]) -> Option<u32> {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    if data.len() < 8 || data[..8] != SIGNATURE {
        return None;
    }
    let mut i = 8;
    while i + 8 <= data.len() {
        let len = u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]) as usize;
        let kind = &data[i + 4..i + 8];
        // pHYs must precede the pixel stream
        if kind == b"IDAT" || kind == b"IEND" {
            return None;
        }
        let start = i + 8;
        if kind == b"pHYs" && len == 9 && start + 9 <= data.len() {
            let ppu_x = u32::from_be_bytes([
                data[start],
                data[start + 1],
                data[start + 2],
                data[start + 3],
            ]);
            let unit = data[start + 8];
            if unit == 1 && ppu_x > 0 {
                return Some(metre_to_inch(ppu_x));
            }
            return None;
        }
        i = start.checked_add(len)?.checked_add(4)?;
    }
    None
}

fn cm_to_inch(dots_per_cm: u32) -> u32 {
    (f64::from(dots_per_cm) * 2.54).round() as u32
}

fn metre_to_inch(pixels_per_metre: u32) -> u32 {
    (f64::from(pixels_per_metre) * 0.0254).round() as u32
}
