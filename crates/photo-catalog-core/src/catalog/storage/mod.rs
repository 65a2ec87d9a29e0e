//! On-disk layout of the catalog.
//!
//! Three cooperating stores beneath a versioned root
//! (`{storage_dir}/v{major.minor}`): typed object-list tables as JSON, one
//! thumbnail blob file per folder, and dated backup snapshots of the whole
//! versioned tree.

mod backup;
mod blob;
mod object_list;

pub use backup::BackupStorage;
pub use blob::BlobStorage;
pub use object_list::ObjectListStorage;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Storage-format version; bumping it starts a fresh `v{major.minor}` tree
pub const STORAGE_VERSION: &str = "1.0";

/// The catalog database: object-list tables, thumbnail blobs, and backups
#[derive(Debug)]
pub struct Database {
    pub tables: ObjectListStorage,
    pub blobs: BlobStorage,
    pub backups: BackupStorage,
    versioned_root: PathBuf,
}

impl Database {
    /// Open (creating if missing) the database under `storage_dir`
    pub fn open(storage_dir: &Path, backups_to_keep: usize) -> Result<Self> {
        let versioned_root = storage_dir.join(format!("v{}", STORAGE_VERSION));
        std::fs::create_dir_all(&versioned_root)?;

        Ok(Self {
            tables: ObjectListStorage::new(versioned_root.join("tables"))?,
            blobs: BlobStorage::new(versioned_root.join("blobs"))?,
            backups: BackupStorage::new(
                storage_dir.join("backups"),
                versioned_root.clone(),
                backups_to_keep,
            )?,
            versioned_root,
        })
    }

    /// Root of the current storage-format version
    pub fn versioned_root(&self) -> &Path {
        &self.versioned_root
    }
}

// -- Tests --
