//! Core functionality for cataloging and synchronizing photo collections.
//!
//! This library provides the foundational components for asset management:
//! - Folder scanning and asset creation (decode, hash, thumbnail)
//! - A persistent catalog with thumbnail blobs and versioned backups
//! - Move/copy/delete operations with partial-failure semantics
//! - Directory-pair synchronization and duplicate detection

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use types::*;

// -- Public Modules --
pub mod catalog;
pub mod cataloging;
pub mod compare;
pub mod config;
pub mod creation;
pub mod duplicates;
pub mod error;
pub mod fsops;
pub mod hashing;
pub mod imaging;
pub mod logging;
pub mod metadata;
pub mod moving;
pub mod sync;
pub mod types;
pub mod video;

// -- Test Modules --
#[cfg(test)]
pub mod test_utils;

use std::path::Path;

use catalog::AssetRepository;

/// Main entry point: owns the resolved configuration and the repository, and
/// exposes the services to the caller (UI, CLI).
pub struct Application {
    config: Config,
    repository: AssetRepository,
}

impl Application {
    /// Open the catalog under the configured storage directory
    pub fn new(config: Config) -> Result<Self> {
        let repository = AssetRepository::open(&config)?;
        Ok(Self { config, repository })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register a directory as a catalog root
    pub fn add_folder(&mut self, path: &Path) -> Folder {
        self.repository.add_folder(path)
    }

    pub fn folders(&self) -> &[Folder] {
        self.repository.folders()
    }

    pub fn assets(&self) -> &[Asset] {
        self.repository.assets()
    }

    /// Thumbnail bytes for a catalogued asset
    pub fn thumbnail(&mut self, folder_path: &Path, file_name: &str) -> Result<Option<Vec<u8>>> {
        self.repository.get_thumbnail(folder_path, file_name)
    }

    /// Run a full catalog scan, reporting progress per processed file
    pub fn catalog_assets(&mut self, callback: &mut dyn FnMut(StatusUpdate)) -> Result<()> {
        cataloging::catalog_assets(&mut self.repository, &self.config, callback)
    }

    /// Create a single asset in an already-registered folder
    pub fn create_asset(
        &mut self,
        directory_path: &str,
        file_name: &str,
        is_video: bool,
    ) -> Result<Option<Asset>> {
        creation::create_asset(
            &mut self.repository,
            &self.config,
            directory_path,
            file_name,
            is_video,
        )
    }

    /// Move (or duplicate) assets into a destination folder
    pub fn move_assets(
        &mut self,
        assets: &[Asset],
        destination_folder: &Path,
        preserve_original_file: bool,
    ) -> Result<bool> {
        moving::move_assets(
            &mut self.repository,
            assets,
            destination_folder,
            preserve_original_file,
        )
    }

    /// Delete assets from disk and catalog
    pub fn delete_assets(&mut self, assets: &[Asset]) -> Result<()> {
        moving::delete_assets(&mut self.repository, assets)
    }

    /// Run the persisted sync configuration, reporting per-file progress
    pub fn execute_sync(&self, callback: &mut dyn FnMut(StatusUpdate)) -> Result<Vec<SyncResult>> {
        sync::execute(self.repository.sync_configuration(), callback)
    }

    pub fn sync_configuration(&self) -> &SyncConfiguration {
        self.repository.sync_configuration()
    }

    pub fn set_sync_configuration(&mut self, configuration: SyncConfiguration) {
        self.repository.set_sync_configuration(configuration);
    }

    /// Duplicate sets among the catalogued assets
    pub fn find_duplicated_assets(&self) -> Vec<Vec<Asset>> {
        duplicates::find_duplicated_assets(self.repository.assets())
    }

    /// Most-recently-used move destinations, most recent first
    pub fn recent_target_paths(&self) -> &[String] {
        self.repository.recent_target_paths()
    }

    /// Persist the catalog
    pub fn save_catalog(&mut self) -> Result<()> {
        self.repository.save_catalog()
    }
}

// -- Tests --
