//! EXIF-derived metadata: orientation reading and rotation mapping.

use exif::{In, Tag};
use std::io::Cursor;

use crate::types::{ImageRotation, StatusFlag};

/// Message attached to assets whose EXIF orientation required normalization
pub const ROTATED_MESSAGE: &str = "The asset has been rotated";

/// Read the EXIF orientation from raw image bytes.
///
/// Files without EXIF data (or with an unreadable segment) report `Rotate0`.
pub fn read_orientation(bytes: &[u8]) -> ImageRotation {
    let mut cursor = Cursor::new(bytes);
    let exif = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(_) => return ImageRotation::Rotate0,
    };

    let value = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));

    match value {
        Some(v) => rotation_from_exif(v),
        None => ImageRotation::Rotate0,
    }
}

/// Map an EXIF orientation value (1..=8) to a rotation.
///
/// Mirrored variants collapse onto the rotation component.
pub fn rotation_from_exif(value: u32) -> ImageRotation {
    match value {
        3 | 4 => ImageRotation::Rotate180,
        5 | 6 => ImageRotation::Rotate90,
        7 | 8 => ImageRotation::Rotate270,
        _ => ImageRotation::Rotate0,
    }
}

/// Rotation flag for an asset: set with the rotated message unless the
/// orientation is `Rotate0`
pub fn rotated_flag(rotation: ImageRotation) -> StatusFlag {
    if rotation == ImageRotation::Rotate0 {
        StatusFlag::clear()
    } else {
        StatusFlag::set(ROTATED_MESSAGE)
    }
}

// -- Tests --
