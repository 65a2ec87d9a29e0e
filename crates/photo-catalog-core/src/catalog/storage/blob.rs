//! Thumbnail blob store: one bincode file per folder, holding the map from
//! file name to thumbnail bytes.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug)]
pub struct BlobStorage {
    blobs_dir: PathBuf,
}

impl BlobStorage {
    pub fn new(blobs_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&blobs_dir)?;
        Ok(Self { blobs_dir })
    }

    fn blob_path(&self, folder_id: Uuid) -> PathBuf {
        self.blobs_dir.join(format!("{}.bin", folder_id))
    }

    /// Read a folder's thumbnail map; a folder with no blob is empty
    pub fn read_blob(&self, folder_id: Uuid) -> Result<HashMap<String, Vec<u8>>> {
        let path = self.blob_path(folder_id);
        if !path.is_file() {
            return Ok(HashMap::new());
        }
        let bytes = fs::read(path)?;
        Ok(bincode::deserialize(&bytes)?)
    }

    /// Replace a folder's thumbnail map
    pub fn write_blob(&self, folder_id: Uuid, thumbnails: &HashMap<String, Vec<u8>>) -> Result<()> {
        let bytes = bincode::serialize(thumbnails)?;
        fs::write(self.blob_path(folder_id), bytes)?;
        Ok(())
    }

    /// Remove a folder's blob file entirely
    pub fn delete_blob(&self, folder_id: Uuid) -> Result<()> {
        let path = self.blob_path(folder_id);
        if path.is_file() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

// -- Tests --
