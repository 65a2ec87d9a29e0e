//! Image decoding and thumbnail generation.
//!
//! Decoding is tolerant: a file the decoder cannot fully parse still yields a
//! `DecodedImage` with whatever the header exposes, flagged as corrupted.
//! Corruption is a data-quality flag, not an abort.

use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageOutputFormat};
use log::warn;
use std::io::Cursor;

use crate::error::{Error, Result};
use crate::types::ImageRotation;

/// Upper bound on thumbnail pixel count before scaling is declared fatal
const MAX_THUMBNAIL_PIXELS: i64 = 1 << 26;

/// Result of decoding image bytes
#[derive(Debug)]
pub struct DecodedImage {
    /// Fully decoded pixels, absent when only the header could be parsed
    pub image: Option<DynamicImage>,

    /// Pixel width as decoded, before rotation normalization
    pub width: u32,

    /// Pixel height as decoded, before rotation normalization
    pub height: u32,

    /// Whether the decoder failed to fully parse the file
    pub corrupted: bool,
}

/// Decode image bytes, falling back to a header-only dimension read when the
/// full decode fails.
pub fn decode(bytes: &[u8]) -> DecodedImage {
    match image::load_from_memory(bytes) {
        Ok(image) => DecodedImage {
            width: image.width(),
            height: image.height(),
            image: Some(image),
            corrupted: false,
        },
        Err(decode_err) => {
            let dimensions = ImageReader::new(Cursor::new(bytes))
                .with_guessed_format()
                .ok()
                .and_then(|reader| reader.into_dimensions().ok());

            let (width, height) = dimensions.unwrap_or((0, 0));
            warn!("Image decode failed ({}); header dims {}x{}", decode_err, width, height);

            DecodedImage {
                image: None,
                width,
                height,
                corrupted: true,
            }
        }
    }
}

/// Width and height after applying the EXIF rotation
pub fn normalized_dimensions(width: u32, height: u32, rotation: ImageRotation) -> (u32, u32) {
    if rotation.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Compute thumbnail dimensions: scale `width`x`height` so neither side
/// exceeds the configured maxima, preserving aspect ratio with integer
/// truncation.
///
/// Degenerate maxima (zero or negative) propagate into degenerate outputs
/// rather than clamping; callers relying on that behavior exist.
pub fn thumbnail_dimensions(width: u32, height: u32, max_width: i32, max_height: i32) -> (i32, i32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let w = i64::from(width);
    let h = i64::from(height);
    let mw = i64::from(max_width);
    let mh = i64::from(max_height);

    // Width-bound when scaling by max_width is the tighter constraint
    if h * mw <= w * mh {
        (max_width, (h * mw / w) as i32)
    } else {
        ((w * mh / h) as i32, max_height)
    }
}

/// Rotate decoded pixels according to the EXIF rotation
pub fn apply_rotation(image: DynamicImage, rotation: ImageRotation) -> DynamicImage {
    match rotation {
        ImageRotation::Rotate0 => image,
        ImageRotation::Rotate90 => image.rotate90(),
        ImageRotation::Rotate180 => image.rotate180(),
        ImageRotation::Rotate270 => image.rotate270(),
    }
}

/// Produce JPEG thumbnail bytes at exactly `width`x`height`.
///
/// Zero or negative target dimensions yield an empty buffer (the catalog
/// still records the computed dimensions). Absurdly large targets are fatal.
pub fn generate_thumbnail(image: &DynamicImage, width: i32, height: i32) -> Result<Vec<u8>> {
    if width <= 0 || height <= 0 {
        return Ok(Vec::new());
    }

    if i64::from(width) * i64::from(height) > MAX_THUMBNAIL_PIXELS {
        return Err(Error::Overflow(format!(
            "thumbnail target {}x{} exceeds pixel limit",
            width, height
        )));
    }

    let resized = image.resize_exact(width as u32, height as u32, FilterType::Triangle);

    // JPEG encoding rejects alpha channels
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut buffer = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buffer), ImageOutputFormat::Jpeg(80))?;
    Ok(buffer)
}

// -- Tests --
