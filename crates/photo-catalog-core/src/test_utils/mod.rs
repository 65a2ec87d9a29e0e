//! Shared fixtures for unit tests.

use chrono::Utc;
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::types::{Asset, AssetMetadata, Folder, ImageRotation};

/// An asset record belonging to `folder`, with fixed dimensions and the given
/// hash. Timestamps default to now.
pub fn asset_in(folder: &Folder, file_name: &str, hash: &str) -> Asset {
    let now = Utc::now();
    Asset {
        file_name: file_name.to_string(),
        folder_id: folder.id,
        folder: folder.clone(),
        pixel_width: 1920,
        pixel_height: 1080,
        thumbnail_pixel_width: 200,
        thumbnail_pixel_height: 112,
        file_size: 1024,
        file_creation: now,
        file_modification: now,
        thumbnail_creation: now,
        rotation: ImageRotation::Rotate0,
        hash: hash.to_string(),
        metadata: AssetMetadata::default(),
    }
}

/// A small synthetic image with per-pixel variation, so fingerprints differ
/// between seeds
pub fn test_image(width: u32, height: u32, seed: u8) -> DynamicImage {
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 7 + seed as u32 * 31) % 256) as u8,
            ((y * 13 + seed as u32 * 17) % 256) as u8,
            ((x + y + seed as u32) % 256) as u8,
        ])
    });
    DynamicImage::ImageRgb8(buffer)
}

/// A minimal EXIF APP1 segment carrying a single orientation tag.
///
/// Little-endian TIFF with one IFD0 entry (tag 0x0112, SHORT, count 1).
pub fn exif_orientation_segment(orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((tiff.len() + 6 + 2) as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}

/// JPEG bytes for a synthetic image, with the given EXIF orientation spliced
/// in right after the SOI marker
pub fn jpeg_with_orientation(width: u32, height: u32, seed: u8, orientation: u16) -> Vec<u8> {
    let mut encoded = Vec::new();
    test_image(width, height, seed)
        .write_to(&mut Cursor::new(&mut encoded), ImageOutputFormat::Jpeg(90))
        .unwrap();
    let mut bytes = encoded[..2].to_vec();
    bytes.extend_from_slice(&exif_orientation_segment(orientation));
    bytes.extend_from_slice(&encoded[2..]);
    bytes
}

/// Write a real PNG file into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, seed: u8) -> PathBuf {
    let image = test_image(width, height, seed);
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
