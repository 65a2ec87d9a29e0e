//! Asset identity hashing.
//!
//! Four algorithms, mutually exclusive by configuration: two content hashes
//! over the raw file bytes (Basic/blake3 and MD5) and two 64-bit image
//! fingerprints over the decoded pixels (perceptual mean hash and difference
//! hash). Fingerprints of visually similar images differ in few bits, unlike
//! the content hashes where any byte change rewrites the whole digest.
//!
//! All variants render as lowercase hex strings so the catalog can compare
//! them without knowing which algorithm produced them.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use md5::{Digest, Md5};

use crate::config::HashAlgorithm;

/// Content hash of raw file bytes (blake3, hex-encoded)
pub fn basic_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// MD5 content hash of raw file bytes (hex-encoded)
pub fn md5_hash(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// 64-bit perceptual mean hash: 8x8 downsample, grayscale, one bit per pixel
/// above the mean.
pub fn perceptual_hash(image: &DynamicImage) -> u64 {
    let small = image.resize_exact(8, 8, FilterType::Nearest);

    // Grayscale formula: 0.299*R + 0.587*G + 0.114*B
    let mut pixels = [0.0f32; 64];
    let mut sum = 0.0f32;
    for y in 0..8 {
        for x in 0..8 {
            let pixel = small.get_pixel(x, y);
            let gray =
                0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
            pixels[(y as usize) * 8 + (x as usize)] = gray;
            sum += gray;
        }
    }
    let mean = sum / 64.0;

    let mut hash: u64 = 0;
    for (bit, &p) in pixels.iter().enumerate() {
        if p > mean {
            hash |= 1u64 << bit;
        }
    }
    hash
}

/// 64-bit difference hash: 9x8 downsample, one bit per horizontal
/// brightness gradient.
pub fn difference_hash(image: &DynamicImage) -> u64 {
    let small = image.resize_exact(9, 8, FilterType::Triangle);

    let mut hash: u64 = 0;
    let mut bit = 0;
    for y in 0..8 {
        for x in 0..8 {
            let left = small.get_pixel(x, y);
            let right = small.get_pixel(x + 1, y);
            let gray_left =
                0.299 * left[0] as f32 + 0.587 * left[1] as f32 + 0.114 * left[2] as f32;
            let gray_right =
                0.299 * right[0] as f32 + 0.587 * right[1] as f32 + 0.114 * right[2] as f32;
            if gray_left < gray_right {
                hash |= 1u64 << bit;
            }
            bit += 1;
        }
    }
    hash
}

/// Hamming distance between two 64-bit fingerprints
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Compute the configured hash for an asset.
///
/// Fingerprint algorithms need decoded pixels; when decoding failed (the
/// corrupted path) they fall back to the Basic content hash so the asset
/// still carries an identity.
pub fn compute_hash(
    algorithm: HashAlgorithm,
    file_bytes: &[u8],
    image: Option<&DynamicImage>,
) -> String {
    match (algorithm, image) {
        (HashAlgorithm::Basic, _) => basic_hash(file_bytes),
        (HashAlgorithm::Md5, _) => md5_hash(file_bytes),
        (HashAlgorithm::PHash, Some(image)) => format!("{:016x}", perceptual_hash(image)),
        (HashAlgorithm::DHash, Some(image)) => format!("{:016x}", difference_hash(image)),
        (HashAlgorithm::PHash | HashAlgorithm::DHash, None) => basic_hash(file_bytes),
    }
}

// -- Tests --
