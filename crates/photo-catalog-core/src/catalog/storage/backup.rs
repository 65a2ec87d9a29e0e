//! Versioned backup snapshots: dated copies of the current storage tree,
//! pruned to the most recent N. Only one writer is assumed; snapshots carry
//! no overlap protection.

use chrono::Utc;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Debug)]
pub struct BackupStorage {
    backups_dir: PathBuf,
    source_root: PathBuf,
    backups_to_keep: usize,
}

impl BackupStorage {
    pub fn new(backups_dir: PathBuf, source_root: PathBuf, backups_to_keep: usize) -> Result<Self> {
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            backups_dir,
            source_root,
            backups_to_keep,
        })
    }

    fn today_name() -> String {
        Utc::now().format("%Y%m%d").to_string()
    }

    /// Whether a snapshot was already written today
    pub fn has_backup_for_today(&self) -> bool {
        self.backups_dir.join(Self::today_name()).is_dir()
    }

    /// Write today's snapshot (once per day) and prune old ones.
    ///
    /// Returns `false` when today's snapshot already exists.
    pub fn write_backup(&self) -> Result<bool> {
        if self.has_backup_for_today() {
            return Ok(false);
        }

        let target = self.backups_dir.join(Self::today_name());
        copy_tree(&self.source_root, &target)?;
        info!("Catalog backup written to {}", target.display());

        self.prune()?;
        Ok(true)
    }

    /// Names of the existing snapshots, oldest first
    pub fn backup_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn prune(&self) -> Result<()> {
        let names = self.backup_names()?;
        if names.len() <= self.backups_to_keep {
            return Ok(());
        }
        for name in &names[..names.len() - self.backups_to_keep] {
            fs::remove_dir_all(self.backups_dir.join(name))?;
        }
        Ok(())
    }
}

fn copy_tree(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target_path = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target_path)?;
        } else {
            fs::copy(entry.path(), target_path)?;
        }
    }
    Ok(())
}

// -- Tests --
