//! Asset creation: validate path, decode, hash, detect duplicates, register.
//!
//! Expected absences (missing file, duplicate-by-identity, disabled video
//! analysis, already-extracted frame, too-short video) return `Ok(None)`.
//! Contract violations (empty arguments, unregistered folder) and fatal
//! scaling failures return `Err`.

use chrono::Utc;
use log::error;

use crate::catalog::AssetRepository;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Asset, AssetMetadata, StatusFlag};
use crate::{fsops, hashing, imaging, metadata, video};

/// Create and register one asset for `file_name` under `directory_path`.
///
/// The folder must already be registered via `AssetRepository::add_folder`.
/// For videos, this extracts the first frame into the configured output
/// directory and returns `Ok(None)`; cataloging the frame happens through a
/// later non-video call against the generated file.
pub fn create_asset(
    repository: &mut AssetRepository,
    config: &Config,
    directory_path: &str,
    file_name: &str,
    is_video: bool,
) -> Result<Option<Asset>> {
    if directory_path.is_empty() {
        return Err(Error::InvalidArgument("path1"));
    }
    if file_name.is_empty() {
        return Err(Error::InvalidArgument("path2"));
    }

    let folder = match repository.get_folder_by_path(directory_path.as_ref()) {
        Some(folder) => folder.clone(),
        None => return Err(Error::FolderNotRegistered(directory_path.into())),
    };

    let full_path = folder.path.join(file_name);
    if !fsops::file_exists(&full_path) {
        error!("Cannot create asset: {} does not exist or is a directory", full_path.display());
        return Ok(None);
    }

    if is_video {
        if !config.analyse_videos {
            return Ok(None);
        }
        video::extract_first_frame(
            &full_path,
            &config.first_frame_dir(),
            config.video_min_duration_secs,
        )?;
        // The extracted frame is catalogued by a second, non-video call
        return Ok(None);
    }

    if repository.is_asset_catalogued(&folder.path, file_name) {
        return Ok(None);
    }

    let (file_creation, file_modification, file_size) = fsops::file_times(&full_path)?;
    let bytes = fsops::read_file_bytes(&full_path)?;

    let decoded = imaging::decode(&bytes);
    let rotation = metadata::read_orientation(&bytes);
    let (pixel_width, pixel_height) =
        imaging::normalized_dimensions(decoded.width, decoded.height, rotation);

    let corrupted = if decoded.corrupted {
        StatusFlag::set(&config.corrupted_message)
    } else {
        StatusFlag::clear()
    };

    let (thumbnail_width, thumbnail_height) = imaging::thumbnail_dimensions(
        pixel_width,
        pixel_height,
        config.thumbnail_max_width,
        config.thumbnail_max_height,
    );

    // Hash the decoded image, not the thumbnail; corrupt files fall back to
    // the content hash inside compute_hash
    let hash = hashing::compute_hash(config.hash_algorithm, &bytes, decoded.image.as_ref());

    let thumbnail = match decoded.image {
        Some(image) => {
            let oriented = imaging::apply_rotation(image, rotation);
            imaging::generate_thumbnail(&oriented, thumbnail_width, thumbnail_height)?
        }
        None => Vec::new(),
    };

    let asset = Asset {
        file_name: file_name.to_string(),
        folder_id: folder.id,
        folder,
        pixel_width,
        pixel_height,
        thumbnail_pixel_width: thumbnail_width,
        thumbnail_pixel_height: thumbnail_height,
        file_size,
        file_creation,
        file_modification,
        thumbnail_creation: Utc::now(),
        rotation,
        hash,
        metadata: AssetMetadata {
            corrupted,
            rotated: metadata::rotated_flag(rotation),
        },
    };

    repository.add_asset(asset.clone(), thumbnail)?;
    Ok(Some(asset))
}

// -- Tests --
