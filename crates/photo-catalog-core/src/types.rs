use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A registered directory in the catalog.
///
/// Folders are created on first reference with a fresh id and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Stable identifier of the folder
    pub id: Uuid,

    /// Absolute, normalized path of the directory
    pub path: PathBuf,
}

impl Folder {
    pub fn new(path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
        }
    }
}

/// Rotation read from the EXIF orientation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageRotation {
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Default for ImageRotation {
    fn default() -> Self {
        Self::Rotate0
    }
}

impl ImageRotation {
    /// Whether this rotation swaps the decoded width and height
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

/// A boolean data-quality flag with an optional human-readable message.
///
/// The message is non-null only when the flag is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlag {
    pub is_true: bool,
    pub message: Option<String>,
}

impl StatusFlag {
    pub fn set(message: &str) -> Self {
        Self {
            is_true: true,
            message: Some(message.to_string()),
        }
    }

    pub fn clear() -> Self {
        Self::default()
    }
}

/// Data-quality metadata attached to an asset during creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Set when the decoder could not fully parse the file
    pub corrupted: StatusFlag,

    /// Set when the EXIF orientation is anything other than `Rotate0`
    pub rotated: StatusFlag,
}

/// One catalogued media file (image or extracted video frame).
///
/// `(folder.id, file_name)` is the natural key within a folder. Thumbnail
/// bytes are not carried here; they live in the blob store keyed by folder
/// path and file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// File name as found on disk, case preserved
    pub file_name: String,

    /// Id of the owning folder
    pub folder_id: Uuid,

    /// Owning folder record
    pub folder: Folder,

    /// Pixel dimensions of the full image, rotation-normalized
    pub pixel_width: u32,
    pub pixel_height: u32,

    /// Thumbnail dimensions after max-width/max-height-constrained resize.
    /// Signed because degenerate configured maxima propagate through.
    pub thumbnail_pixel_width: i32,
    pub thumbnail_pixel_height: i32,

    /// File size in bytes
    pub file_size: u64,

    /// Filesystem creation timestamp
    pub file_creation: DateTime<Utc>,

    /// Filesystem modification timestamp
    pub file_modification: DateTime<Utc>,

    /// When the thumbnail blob was generated
    pub thumbnail_creation: DateTime<Utc>,

    /// Rotation read from EXIF orientation
    pub rotation: ImageRotation,

    /// Identity hash under the configured algorithm
    pub hash: String,

    /// Corruption and rotation flags
    pub metadata: AssetMetadata,
}

impl Asset {
    /// Full on-disk path of the asset
    pub fn full_path(&self) -> PathBuf {
        self.folder.path.join(&self.file_name)
    }
}

/// One source→destination directory pairing for synchronization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncDefinition {
    pub source_directory: String,
    pub destination_directory: String,

    /// Treat every subdirectory as an implicit additional pairing against the
    /// mirrored destination subdirectory
    pub include_sub_folders: bool,

    /// Delete destination files whose names are absent from the source
    pub delete_assets_not_in_source: bool,
}

/// Persisted, ordered list of sync pairings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfiguration {
    pub definitions: Vec<SyncDefinition>,
}

/// Outcome of one sync pairing (explicit or implicit subfolder pairing)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub source_directory: String,
    pub destination_directory: String,
    pub synced_images: usize,
    pub message: String,
}

/// Progress notification passed to callbacks, one per processed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub new_status: String,
}

impl StatusUpdate {
    pub fn new(new_status: String) -> Self {
        Self { new_status }
    }
}

/// Media kind derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    /// Determine kind from a file path's extension
    pub fn from_path(path: &Path) -> Self {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => return Self::Other,
        };

        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "tif" | "tiff" | "heic" | "dng" => {
                Self::Image
            }
            "mp4" | "mov" | "avi" | "mkv" | "webm" => Self::Video,
            _ => Self::Other,
        }
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_path() {
        assert_eq!(MediaKind::from_path(Path::new("a.jpg")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("a.JPEG")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("a.heic")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("a.mp4")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("a.txt")), MediaKind::Other);
        assert_eq!(MediaKind::from_path(Path::new("noext")), MediaKind::Other);
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        assert!(!ImageRotation::Rotate0.swaps_dimensions());
        assert!(ImageRotation::Rotate90.swaps_dimensions());
        assert!(!ImageRotation::Rotate180.swaps_dimensions());
        assert!(ImageRotation::Rotate270.swaps_dimensions());
    }

    #[test]
    fn test_status_flag_set_carries_message() {
        let flag = StatusFlag::set("The asset has been rotated");
        assert!(flag.is_true);
        assert_eq!(flag.message.as_deref(), Some("The asset has been rotated"));

        let clear = StatusFlag::clear();
        assert!(!clear.is_true);
        assert!(clear.message.is_none());
    }
}
