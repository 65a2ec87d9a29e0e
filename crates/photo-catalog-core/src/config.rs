use std::path::PathBuf;

/// Hash algorithm used to compute `Asset::hash`.
///
/// The algorithms are mutually exclusive for a given catalog: two assets are
/// only comparable as duplicates when their hashes were produced by the same
/// algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// Content hash of the raw file bytes (blake3, hex-encoded)
    Basic,

    /// MD5 content hash of the raw file bytes (hex-encoded)
    Md5,

    /// 64-bit perceptual mean hash of the decoded image
    PHash,

    /// 64-bit difference hash of the decoded image
    DHash,
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        Self::Basic
    }
}

/// Configuration for the cataloging and synchronization pipeline.
///
/// Resolved once at startup and passed by reference to the services; no field
/// changes during a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the photo collection; video first frames are written
    /// beneath it
    pub assets_root: PathBuf,

    /// Directory holding the persisted catalog (tables, blobs, backups)
    pub storage_dir: PathBuf,

    /// Maximum thumbnail width in pixels. Any sign/magnitude is accepted;
    /// degenerate values propagate into degenerate thumbnail dimensions.
    pub thumbnail_max_width: i32,

    /// Maximum thumbnail height in pixels
    pub thumbnail_max_height: i32,

    /// Hash algorithm for asset identity
    pub hash_algorithm: HashAlgorithm,

    /// Whether video files are analysed and their first frame extracted
    pub analyse_videos: bool,

    /// Name of the directory (under `assets_root`) receiving extracted first
    /// frames
    pub first_frame_dir_name: String,

    /// Minimum video duration in seconds below which no frame is extracted
    pub video_min_duration_secs: f32,

    /// Number of processed files between catalog persistence points during a
    /// full scan
    pub catalog_batch_size: usize,

    /// Message attached to assets whose image data could not be fully decoded
    pub corrupted_message: String,

    /// Number of backup snapshots to retain
    pub backups_to_keep: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("."),
            storage_dir: PathBuf::from("photo-catalog-data"),
            thumbnail_max_width: 200,
            thumbnail_max_height: 150,
            hash_algorithm: HashAlgorithm::default(),
            analyse_videos: false,
            first_frame_dir_name: String::from("OutputVideoFirstFrame"),
            video_min_duration_secs: 1.0,
            catalog_batch_size: 100,
            corrupted_message: String::from("The asset is corrupted"),
            backups_to_keep: 2,
        }
    }
}

impl Config {
    /// Full path of the directory receiving extracted video first frames
    pub fn first_frame_dir(&self) -> PathBuf {
        self.assets_root.join(&self.first_frame_dir_name)
    }
}
