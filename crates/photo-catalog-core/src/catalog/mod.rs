//! The persistent catalog: folders, assets, thumbnails, sync configuration,
//! and recent target paths, backed by the storage layer.
//!
//! One repository instance exists per process and is passed by reference to
//! the services; there are no ambient singletons. Thumbnail maps load lazily
//! per folder and are written back only when dirty.

pub mod storage;

use log::info;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::types::{Asset, Folder, SyncConfiguration};

use storage::Database;

const ASSETS_TABLE: &str = "Assets";
const FOLDERS_TABLE: &str = "Folders";
const SYNC_DEFINITIONS_TABLE: &str = "SyncDefinitions";
const RECENT_TARGET_PATHS_TABLE: &str = "RecentTargetPaths";

#[derive(Debug)]
pub struct AssetRepository {
    database: Database,
    folders: Vec<Folder>,
    assets: Vec<Asset>,
    sync_configuration: SyncConfiguration,
    recent_target_paths: Vec<String>,

    /// Lazily loaded thumbnail maps, keyed by folder id
    thumbnails: HashMap<Uuid, HashMap<String, Vec<u8>>>,
    dirty_thumbnail_folders: HashSet<Uuid>,
    has_changes: bool,
}

impl AssetRepository {
    /// Open the repository, loading all tables from storage
    pub fn open(config: &Config) -> Result<Self> {
        let database = Database::open(&config.storage_dir, config.backups_to_keep)?;

        let folders: Vec<Folder> = database.tables.read_object_list(FOLDERS_TABLE)?;
        let assets: Vec<Asset> = database.tables.read_object_list(ASSETS_TABLE)?;
        let sync_definitions = database.tables.read_object_list(SYNC_DEFINITIONS_TABLE)?;
        let recent_target_paths: Vec<String> =
            database.tables.read_object_list(RECENT_TARGET_PATHS_TABLE)?;

        info!(
            "Catalog opened: {} folders, {} assets",
            folders.len(),
            assets.len()
        );

        Ok(Self {
            database,
            folders,
            assets,
            sync_configuration: SyncConfiguration {
                definitions: sync_definitions,
            },
            recent_target_paths,
            thumbnails: HashMap::new(),
            dirty_thumbnail_folders: HashSet::new(),
            has_changes: false,
        })
    }

    // -- Folders --

    /// Register a directory, creating a Folder with a fresh id if the path is
    /// unknown. Registering an already-known path returns the existing record.
    pub fn add_folder(&mut self, path: &Path) -> Folder {
        if let Some(existing) = self.get_folder_by_path(path) {
            return existing.clone();
        }
        let folder = Folder::new(path.to_path_buf());
        self.folders.push(folder.clone());
        self.has_changes = true;
        folder
    }

    pub fn get_folder_by_path(&self, path: &Path) -> Option<&Folder> {
        self.folders.iter().find(|f| f.path == path)
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    // -- Assets --

    /// Whether an asset with this folder path and file name is catalogued
    pub fn is_asset_catalogued(&self, folder_path: &Path, file_name: &str) -> bool {
        self.assets
            .iter()
            .any(|a| a.folder.path == folder_path && a.file_name == file_name)
    }

    /// Register a new asset and its thumbnail bytes
    pub fn add_asset(&mut self, asset: Asset, thumbnail: Vec<u8>) -> Result<()> {
        let folder_id = asset.folder_id;
        let file_name = asset.file_name.clone();

        self.assets.push(asset);
        self.ensure_thumbnails_loaded(folder_id)?;
        self.thumbnails
            .entry(folder_id)
            .or_default()
            .insert(file_name, thumbnail);
        self.dirty_thumbnail_folders.insert(folder_id);
        self.has_changes = true;
        Ok(())
    }

    /// Remove an asset and its thumbnail entry. Returns the removed asset,
    /// or None when no such entry exists.
    pub fn delete_asset(&mut self, folder_path: &Path, file_name: &str) -> Result<Option<Asset>> {
        let position = self
            .assets
            .iter()
            .position(|a| a.folder.path == folder_path && a.file_name == file_name);

        let Some(position) = position else {
            return Ok(None);
        };
        let asset = self.assets.remove(position);

        self.ensure_thumbnails_loaded(asset.folder_id)?;
        if let Some(map) = self.thumbnails.get_mut(&asset.folder_id) {
            map.remove(file_name);
        }
        self.dirty_thumbnail_folders.insert(asset.folder_id);
        self.has_changes = true;
        Ok(Some(asset))
    }

    /// All catalogued assets
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Catalogued assets belonging to one folder, in catalog order
    pub fn assets_by_path(&self, folder_path: &Path) -> Vec<Asset> {
        self.assets
            .iter()
            .filter(|a| a.folder.path == folder_path)
            .cloned()
            .collect()
    }

    // -- Thumbnails --

    /// Thumbnail bytes for a catalogued asset, if present
    pub fn get_thumbnail(&mut self, folder_path: &Path, file_name: &str) -> Result<Option<Vec<u8>>> {
        let Some(folder) = self.get_folder_by_path(folder_path) else {
            return Ok(None);
        };
        let folder_id = folder.id;
        self.ensure_thumbnails_loaded(folder_id)?;
        Ok(self
            .thumbnails
            .get(&folder_id)
            .and_then(|map| map.get(file_name))
            .cloned())
    }

    fn ensure_thumbnails_loaded(&mut self, folder_id: Uuid) -> Result<()> {
        if !self.thumbnails.contains_key(&folder_id) {
            let map = self.database.blobs.read_blob(folder_id)?;
            self.thumbnails.insert(folder_id, map);
        }
        Ok(())
    }

    // -- Sync configuration --

    pub fn sync_configuration(&self) -> &SyncConfiguration {
        &self.sync_configuration
    }

    pub fn set_sync_configuration(&mut self, configuration: SyncConfiguration) {
        self.sync_configuration = configuration;
        self.has_changes = true;
    }

    // -- Recent target paths --

    pub fn recent_target_paths(&self) -> &[String] {
        &self.recent_target_paths
    }

    /// Move `path` to the front of the recent-target list, deduplicating
    pub fn promote_recent_target_path(&mut self, path: &str) {
        self.recent_target_paths.retain(|p| p != path);
        self.recent_target_paths.insert(0, path.to_string());
        self.has_changes = true;
    }

    // -- Persistence --

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// Persist every table and every dirty thumbnail blob. Does nothing when
    /// no in-memory state changed since the last save.
    pub fn save_catalog(&mut self) -> Result<()> {
        if !self.has_changes {
            return Ok(());
        }

        self.database
            .tables
            .write_object_list(FOLDERS_TABLE, &self.folders)?;
        self.database
            .tables
            .write_object_list(ASSETS_TABLE, &self.assets)?;
        self.database
            .tables
            .write_object_list(SYNC_DEFINITIONS_TABLE, &self.sync_configuration.definitions)?;
        self.database
            .tables
            .write_object_list(RECENT_TARGET_PATHS_TABLE, &self.recent_target_paths)?;

        for folder_id in self.dirty_thumbnail_folders.drain() {
            match self.thumbnails.get(&folder_id) {
                Some(map) if !map.is_empty() => {
                    self.database.blobs.write_blob(folder_id, map)?;
                }
                _ => self.database.blobs.delete_blob(folder_id)?,
            }
        }

        self.has_changes = false;
        Ok(())
    }

    /// Write a dated backup snapshot of the storage tree (once per day)
    pub fn write_backup(&self) -> Result<bool> {
        self.database.backups.write_backup()
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use std::fs;
    use tempfile::tempdir;

    fn open_repo(storage: &Path) -> AssetRepository {
        let config = Config {
            storage_dir: storage.to_path_buf(),
            ..Config::default()
        };
        AssetRepository::open(&config).unwrap()
    }

    #[test]
    fn test_add_folder_is_idempotent_by_path() {
        let dir = tempdir().unwrap();
        let mut repo = open_repo(dir.path());

        let first = repo.add_folder(Path::new("/photos/2024"));
        let second = repo.add_folder(Path::new("/photos/2024"));
        assert_eq!(first.id, second.id);
        assert_eq!(repo.folders().len(), 1);
    }

    #[test]
    fn test_add_and_delete_asset_updates_thumbnails() {
        let dir = tempdir().unwrap();
        let mut repo = open_repo(dir.path());

        let folder = repo.add_folder(Path::new("/photos"));
        let asset = test_utils::asset_in(&folder, "one.jpg", "hash-1");
        repo.add_asset(asset, vec![1, 2, 3]).unwrap();

        assert!(repo.is_asset_catalogued(Path::new("/photos"), "one.jpg"));
        assert_eq!(
            repo.get_thumbnail(Path::new("/photos"), "one.jpg").unwrap(),
            Some(vec![1, 2, 3])
        );

        let removed = repo.delete_asset(Path::new("/photos"), "one.jpg").unwrap();
        assert!(removed.is_some());
        assert!(!repo.is_asset_catalogued(Path::new("/photos"), "one.jpg"));
        assert_eq!(
            repo.get_thumbnail(Path::new("/photos"), "one.jpg").unwrap(),
            None
        );
    }

    #[test]
    fn test_delete_unknown_asset_is_none() {
        let dir = tempdir().unwrap();
        let mut repo = open_repo(dir.path());
        repo.add_folder(Path::new("/photos"));
        let removed = repo.delete_asset(Path::new("/photos"), "ghost.jpg").unwrap();
        assert!(removed.is_none());
    }

    #[test]
    fn test_save_and_reopen_round_trip() {
        let dir = tempdir().unwrap();
        {
            let mut repo = open_repo(dir.path());
            let folder = repo.add_folder(Path::new("/photos"));
            repo.add_asset(
                test_utils::asset_in(&folder, "keep.jpg", "hash-keep"),
                vec![9, 9],
            )
            .unwrap();
            repo.promote_recent_target_path("/somewhere");
            repo.save_catalog().unwrap();
        }

        let mut reopened = open_repo(dir.path());
        assert_eq!(reopened.folders().len(), 1);
        assert_eq!(reopened.assets().len(), 1);
        assert_eq!(reopened.assets()[0].hash, "hash-keep");
        assert_eq!(reopened.recent_target_paths(), ["/somewhere"]);
        assert_eq!(
            reopened.get_thumbnail(Path::new("/photos"), "keep.jpg").unwrap(),
            Some(vec![9, 9])
        );
    }

    #[test]
    fn test_save_catalog_skips_when_nothing_changed() {
        let dir = tempdir().unwrap();
        let mut repo = open_repo(dir.path());

        repo.add_folder(Path::new("/photos"));
        assert!(repo.has_changes());
        repo.save_catalog().unwrap();
        assert!(!repo.has_changes());

        // A save with no pending changes must not touch storage
        let folders_table = dir.path().join("v1.0").join("tables").join("Folders.json");
        fs::remove_file(&folders_table).unwrap();
        repo.save_catalog().unwrap();
        assert!(!folders_table.exists());

        repo.promote_recent_target_path("/elsewhere");
        repo.save_catalog().unwrap();
        assert!(folders_table.exists());
    }

    #[test]
    fn test_promote_recent_target_path_deduplicates() {
        let dir = tempdir().unwrap();
        let mut repo = open_repo(dir.path());

        repo.promote_recent_target_path("/a");
        repo.promote_recent_target_path("/b");
        repo.promote_recent_target_path("/a");
        assert_eq!(repo.recent_target_paths(), ["/a", "/b"]);
    }

    #[test]
    fn test_sync_configuration_round_trip() {
        let dir = tempdir().unwrap();
        {
            let mut repo = open_repo(dir.path());
            repo.set_sync_configuration(SyncConfiguration {
                definitions: vec![crate::types::SyncDefinition {
                    source_directory: "/src".into(),
                    destination_directory: "/dst".into(),
                    include_sub_folders: true,
                    delete_assets_not_in_source: false,
                }],
            });
            repo.save_catalog().unwrap();
        }

        let reopened = open_repo(dir.path());
        let config = reopened.sync_configuration();
        assert_eq!(config.definitions.len(), 1);
        assert_eq!(config.definitions[0].source_directory, "/src");
        assert!(config.definitions[0].include_sub_folders);
    }
}
