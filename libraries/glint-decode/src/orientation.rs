/// EXIF orientation extraction
use exif::{In, Reader, Tag};
use tracing::debug;

const EXIF_IDENTIFIER: &[u8] = b"Exif\0\0";

/// Pull the orientation tag (1-8) out of a raw EXIF block, or 0 when the
/// block has none or does not parse
///
/// Containers differ on whether the blob carries the `Exif\0\0` identifier
/// ahead of the TIFF header; both layouts are accepted.
pub(crate) fn from_exif(raw: &[u8]) -> u8 {
    let tiff = raw.strip_prefix(EXIF_IDENTIFIER).unwrap_or(raw);
    let parsed = match Reader::new().read_raw(tiff.to_vec()) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(%err, "EXIF blob did not parse");
            return 0;
        }
    };
    let value = parsed
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));
    match value {
        Some(v @ 1..=8) => v as u8,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal little-endian TIFF block holding only an orientation entry
    fn tiff_with_orientation(orientation: u16) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"II");
        data.extend_from_slice(&42u16.to_le_bytes());
        data.extend_from_slice(&8u32.to_le_bytes()); // IFD offset
        data.extend_from_slice(&1u16.to_le_bytes()); // entry count
        data.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
        data.extend_from_slice(&3u16.to_le_bytes()); // SHORT
        data.extend_from_slice(&1u32.to_le_bytes()); // count
        data.extend_from_slice(&orientation.to_le_bytes());
        data.extend_from_slice(&[0, 0]); // value padding
        data.extend_from_slice(&0u32.to_le_bytes()); // no next IFD
        data
    }

    #[test]
    fn orientation_tag_is_read() {
        assert_eq!(from_exif(&tiff_with_orientation(6)), 6);
    }

    #[test]
    fn identifier_prefix_is_tolerated() {
        let mut blob = EXIF_IDENTIFIER.to_vec();
        blob.extend_from_slice(&tiff_with_orientation(3));
        assert_eq!(from_exif(&blob), 3);
    }

    #[test]
    fn out_of_range_values_are_dropped() {
        assert_eq!(from_exif(&tiff_with_orientation(9)), 0);
        assert_eq!(from_exif(&tiff_with_orientation(0)), 0);
    }

    #[test]
    fn garbage_reports_no_orientation() {
        assert_eq!(from_exif(b"not exif data"), 0);
    }
}
