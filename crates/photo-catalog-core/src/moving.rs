//! Copy, move, and delete assets across folders, keeping the catalog and
//! thumbnail store in step.
//!
//! Batch operations apply partial-failure semantics: items completed before a
//! failing item stay completed; nothing is rolled back. Callers inspect the
//! result and catalog state to see what happened.

use log::{error, info};
use std::io::ErrorKind;
use std::path::Path;

use crate::catalog::AssetRepository;
use crate::error::{Error, Result};
use crate::fsops;
use crate::types::Asset;

/// Copy a single file.
///
/// Returns `Ok(false)` for recoverable refusals: empty destination, read-only
/// or otherwise permission-denied destination, source being a directory, or
/// an empty source when the destination already exists. Same-path copies and
/// a vanished source whose destination already exists count as satisfied
/// (`Ok(true)`). Genuinely missing sources and directory-shaped destinations
/// are contract errors.
pub fn copy_asset(source: &Path, destination: &Path) -> Result<bool> {
    if destination.as_os_str().is_empty() {
        return Ok(false);
    }

    if destination.is_dir() {
        return Err(Error::TargetIsDirectory(destination.to_path_buf()));
    }

    if source == destination {
        return Ok(true);
    }

    if source.is_dir() {
        return Ok(false);
    }

    if source.as_os_str().is_empty() {
        if destination.is_file() {
            return Ok(false);
        }
        return Err(Error::FileNotFound(source.to_path_buf()));
    }

    if !source.is_file() {
        if destination.is_file() {
            // Already satisfied: the destination holds the content and the
            // source is gone
            return Ok(true);
        }
        match source.parent() {
            Some(parent) if parent.as_os_str().is_empty() || parent.exists() => {
                return Err(Error::FileNotFound(source.to_path_buf()));
            }
            Some(parent) => return Err(Error::DirectoryNotFound(parent.to_path_buf())),
            None => return Err(Error::FileNotFound(source.to_path_buf())),
        }
    }

    if let Some(parent) = destination.parent() {
        if parent.is_dir() && fsops::is_directory_read_only(parent) {
            error!(
                "Copy refused (read-only destination): {} -> {}",
                source.display(),
                destination.display()
            );
            return Ok(false);
        }
    }

    match fsops::copy_file(source, destination) {
        Ok(()) => Ok(true),
        Err(Error::Io(e)) if e.kind() == ErrorKind::PermissionDenied => {
            error!(
                "Copy refused (permission denied): {} -> {}",
                source.display(),
                destination.display()
            );
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Move (or, with `preserve_original_file`, duplicate) a batch of assets into
/// `destination_folder`.
///
/// Returns `Ok(false)` without touching the current asset's source state when
/// the destination refuses the copy; assets processed earlier in the batch
/// remain moved. On success the destination path is promoted to the front of
/// the recent-target-paths list.
pub fn move_assets(
    repository: &mut AssetRepository,
    assets: &[Asset],
    destination_folder: &Path,
    preserve_original_file: bool,
) -> Result<bool> {
    if assets.is_empty() {
        return Err(Error::InvalidArgument("assets"));
    }
    if destination_folder.as_os_str().is_empty() {
        return Err(Error::InvalidArgument("destinationFolder"));
    }

    let mut moved_any = false;

    for asset in assets {
        if asset.folder.path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("Folder"));
        }
        if asset.file_name.is_empty() {
            return Err(Error::InvalidArgument("asset"));
        }

        let source_path = asset.full_path();
        if !fsops::file_exists(&source_path) {
            return Err(Error::FileNotFound(source_path));
        }

        let destination_path = destination_folder.join(&asset.file_name);
        if source_path == destination_path {
            // Already in place; catalog and thumbnail entries stay as-is
            moved_any = true;
            continue;
        }

        if !copy_asset(&source_path, &destination_path)? {
            return Ok(false);
        }

        let destination = repository.add_folder(destination_folder);
        if !repository.is_asset_catalogued(&destination.path, &asset.file_name) {
            let thumbnail = repository
                .get_thumbnail(&asset.folder.path, &asset.file_name)?
                .unwrap_or_default();
            let mut copied = asset.clone();
            copied.folder_id = destination.id;
            copied.folder = destination;
            repository.add_asset(copied, thumbnail)?;
        }

        if !preserve_original_file {
            fsops::delete_file(&source_path)?;
            repository.delete_asset(&asset.folder.path, &asset.file_name)?;
        }

        info!(
            "Asset {} {} to {}",
            source_path.display(),
            if preserve_original_file { "copied" } else { "moved" },
            destination_path.display()
        );
        moved_any = true;
    }

    if moved_any {
        repository.promote_recent_target_path(&destination_folder.to_string_lossy());
    }

    Ok(true)
}

/// Delete a batch of assets from disk and from the catalog.
///
/// A missing file aborts the batch with `FileNotFound` before any catalog
/// mutation for that asset; earlier deletions stay applied.
pub fn delete_assets(repository: &mut AssetRepository, assets: &[Asset]) -> Result<()> {
    if assets.is_empty() {
        return Err(Error::InvalidArgument("assets"));
    }

    for asset in assets {
        if asset.folder.path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("Folder"));
        }

        let full_path = asset.full_path();
        if !fsops::file_exists(&full_path) {
            return Err(Error::FileNotFound(full_path));
        }

        fsops::delete_file(&full_path)?;
        repository.delete_asset(&asset.folder.path, &asset.file_name)?;
        info!("Asset deleted: {}", full_path.display());
    }

    Ok(())
}

// -- Tests --
