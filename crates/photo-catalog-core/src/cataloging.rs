//! Full catalog rescan: register folders under the assets root, create assets
//! for new files, refresh updated ones, drop entries for deleted files, and
//! persist the catalog in batches.

use log::{info, warn};
use walkdir::WalkDir;

use crate::catalog::AssetRepository;
use crate::compare;
use crate::config::Config;
use crate::creation;
use crate::error::Result;
use crate::fsops;
use crate::types::{Folder, StatusUpdate};

/// Scan every registered folder, keeping the catalog consistent with the
/// disk. Progress is reported synchronously, one callback per processed file;
/// the catalog is persisted every `catalog_batch_size` processed files and
/// once at the end, followed by the daily backup.
pub fn catalog_assets(
    repository: &mut AssetRepository,
    config: &Config,
    callback: &mut dyn FnMut(StatusUpdate),
) -> Result<()> {
    register_root_folders(repository, config);

    let folders: Vec<Folder> = repository.folders().to_vec();
    let mut processed = 0usize;

    for folder in folders {
        catalog_folder(repository, config, &folder, &mut processed, callback)?;
    }

    repository.save_catalog()?;
    repository.write_backup()?;
    info!("Catalog scan finished: {} assets", repository.assets().len());
    Ok(())
}

/// Register the assets root and all of its subdirectories, plus the video
/// first-frame output directory when video analysis is on.
fn register_root_folders(repository: &mut AssetRepository, config: &Config) {
    if config.assets_root.is_dir() {
        for entry in WalkDir::new(&config.assets_root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
        {
            repository.add_folder(entry.path());
        }
    }

    if config.analyse_videos {
        repository.add_folder(&config.first_frame_dir());
    }
}

fn catalog_folder(
    repository: &mut AssetRepository,
    config: &Config,
    folder: &Folder,
    processed: &mut usize,
    callback: &mut dyn FnMut(StatusUpdate),
) -> Result<()> {
    if !fsops::folder_exists(&folder.path) {
        remove_folder_entries(repository, folder, callback)?;
        return Ok(());
    }

    let directory = folder.path.to_string_lossy().into_owned();
    let disk_names = fsops::get_file_names(&folder.path)?;

    // Entries whose file vanished from disk
    for asset in repository.assets_by_path(&folder.path) {
        if !disk_names.contains(&asset.file_name) {
            repository.delete_asset(&folder.path, &asset.file_name)?;
            callback(StatusUpdate::new(format!(
                "Removed '{}' from the catalog",
                folder.path.join(&asset.file_name).display()
            )));
            bump(repository, config, processed)?;
        }
    }

    // Entries whose file changed on disk since the thumbnail was generated
    let mut remaining = repository.assets_by_path(&folder.path);
    for file_name in compare::get_updated_file_names(&mut remaining)? {
        repository.delete_asset(&folder.path, &file_name)?;
        if creation::create_asset(repository, config, &directory, &file_name, false)?.is_some() {
            callback(StatusUpdate::new(format!(
                "Updated '{}'",
                folder.path.join(&file_name).display()
            )));
        }
        bump(repository, config, processed)?;
    }

    // New image files
    for file_name in fsops::get_image_names(&folder.path)? {
        if repository.is_asset_catalogued(&folder.path, &file_name) {
            continue;
        }
        if creation::create_asset(repository, config, &directory, &file_name, false)?.is_some() {
            callback(StatusUpdate::new(format!(
                "Catalogued '{}'",
                folder.path.join(&file_name).display()
            )));
        }
        bump(repository, config, processed)?;
    }

    // Videos only feed the first-frame extractor; the frame file is
    // catalogued when the output folder is scanned
    if config.analyse_videos {
        for file_name in fsops::get_video_names(&folder.path)? {
            if let Err(e) = creation::create_asset(repository, config, &directory, &file_name, true)
            {
                warn!("Video analysis failed for '{}': {}", file_name, e);
            }
            bump(repository, config, processed)?;
        }
    }

    Ok(())
}

fn remove_folder_entries(
    repository: &mut AssetRepository,
    folder: &Folder,
    callback: &mut dyn FnMut(StatusUpdate),
) -> Result<()> {
    for asset in repository.assets_by_path(&folder.path) {
        repository.delete_asset(&folder.path, &asset.file_name)?;
        callback(StatusUpdate::new(format!(
            "Removed '{}' from the catalog",
            folder.path.join(&asset.file_name).display()
        )));
    }
    Ok(())
}

/// Periodic persistence: one save per `catalog_batch_size` processed files
fn bump(repository: &mut AssetRepository, config: &Config, processed: &mut usize) -> Result<()> {
    *processed += 1;
    if config.catalog_batch_size > 0 && *processed % config.catalog_batch_size == 0 {
        repository.save_catalog()?;
    }
    Ok(())
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn config_for(root: &Path, storage: &Path) -> Config {
        Config {
            assets_root: root.to_path_buf(),
            storage_dir: storage.to_path_buf(),
            catalog_batch_size: 2,
            ..Config::default()
        }
    }

    fn run_catalog(config: &Config) -> (AssetRepository, Vec<String>) {
        let mut repository = AssetRepository::open(config).unwrap();
        let mut statuses = Vec::new();
        catalog_assets(&mut repository, config, &mut |update| {
            statuses.push(update.new_status);
        })
        .unwrap();
        (repository, statuses)
    }

    fn photo_tree(root: &Path) -> PathBuf {
        let photos = root.join("photos");
        fs::create_dir_all(photos.join("holiday")).unwrap();
        test_utils::write_png(&photos, "one.png", 64, 48, 1);
        test_utils::write_png(&photos, "two.png", 48, 64, 2);
        test_utils::write_png(&photos.join("holiday"), "beach.png", 32, 32, 3);
        photos
    }

    #[test]
    fn test_full_scan_catalogs_root_and_subfolders() {
        let dir = tempdir().unwrap();
        let photos = photo_tree(dir.path());
        let config = config_for(&photos, &dir.path().join("storage"));

        let (repository, statuses) = run_catalog(&config);

        assert_eq!(repository.assets().len(), 3);
        assert!(repository.is_asset_catalogued(&photos, "one.png"));
        assert!(repository.is_asset_catalogued(&photos.join("holiday"), "beach.png"));
        assert_eq!(statuses.iter().filter(|s| s.starts_with("Catalogued")).count(), 3);
    }

    #[test]
    fn test_rescan_is_stable_and_removes_deleted_files() {
        let dir = tempdir().unwrap();
        let photos = photo_tree(dir.path());
        let config = config_for(&photos, &dir.path().join("storage"));

        let (repository, _) = run_catalog(&config);
        drop(repository);

        fs::remove_file(photos.join("two.png")).unwrap();
        let (repository, statuses) = run_catalog(&config);

        assert_eq!(repository.assets().len(), 2);
        assert!(!repository.is_asset_catalogued(&photos, "two.png"));
        assert!(statuses
            .iter()
            .any(|s| s.starts_with("Removed") && s.contains("two.png")));
        // Unchanged files were not re-catalogued
        assert_eq!(statuses.iter().filter(|s| s.starts_with("Catalogued")).count(), 0);
    }

    #[test]
    fn test_catalog_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let photos = photo_tree(dir.path());
        let config = config_for(&photos, &dir.path().join("storage"));

        let (repository, _) = run_catalog(&config);
        drop(repository);

        let reopened = AssetRepository::open(&config).unwrap();
        assert_eq!(reopened.assets().len(), 3);
        assert!(reopened.folders().len() >= 2);
    }

    #[test]
    fn test_non_image_files_are_ignored() {
        let dir = tempdir().unwrap();
        let photos = dir.path().join("photos");
        fs::create_dir_all(&photos).unwrap();
        test_utils::write_png(&photos, "real.png", 16, 16, 1);
        fs::write(photos.join("notes.txt"), b"not media").unwrap();

        let config = config_for(&photos, &dir.path().join("storage"));
        let (repository, _) = run_catalog(&config);

        assert_eq!(repository.assets().len(), 1);
        assert!(!repository.is_asset_catalogued(&photos, "notes.txt"));
    }
}
