//! Low-level filesystem wrapper used by every service.
//!
//! All path checks happen at use time, not ahead of a whole batch, so a file
//! removed mid-operation surfaces as a `FileNotFound` error on the item that
//! hits it.

use chrono::{DateTime, Utc};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::MediaKind;

/// Check whether a directory exists
pub fn folder_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Check whether a regular file exists
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// List the names of regular files directly under `directory`, sorted for
/// deterministic processing order.
pub fn get_file_names(directory: &Path) -> Result<Vec<String>> {
    if !directory.is_dir() {
        return Err(Error::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// List file names under `directory` filtered to image extensions
pub fn get_image_names(directory: &Path) -> Result<Vec<String>> {
    let names = get_file_names(directory)?;
    Ok(names
        .into_iter()
        .filter(|n| MediaKind::from_path(Path::new(n)) == MediaKind::Image)
        .collect())
}

/// List file names under `directory` filtered to video extensions
pub fn get_video_names(directory: &Path) -> Result<Vec<String>> {
    let names = get_file_names(directory)?;
    Ok(names
        .into_iter()
        .filter(|n| MediaKind::from_path(Path::new(n)) == MediaKind::Video)
        .collect())
}

/// List the subdirectories directly under `directory`, sorted by name
pub fn get_sub_directories(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(Error::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Read the full contents of a file
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Filesystem creation and modification timestamps plus size, in UTC.
///
/// Platforms without a creation timestamp fall back to the modification time.
pub fn file_times(path: &Path) -> Result<(DateTime<Utc>, DateTime<Utc>, u64)> {
    let metadata = fs::metadata(path)?;
    let modified: DateTime<Utc> = metadata.modified()?.into();
    let created: DateTime<Utc> = match metadata.created() {
        Ok(t) => t.into(),
        Err(_) => {
            warn!("No creation timestamp for {}; using mtime", path.display());
            modified
        }
    };
    Ok((created, modified, metadata.len()))
}

/// Whether the directory rejects writes (permission bits only; ownership and
/// ACLs are not inspected)
pub fn is_directory_read_only(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.permissions().readonly(),
        Err(_) => false,
    }
}

/// Create the directory and its missing parents
pub fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Copy `source` to `destination`, creating the destination's parent
/// directory if it is missing
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::copy(source, destination)?;
    Ok(())
}

/// Delete a single file
pub fn delete_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    fs::remove_file(path)?;
    Ok(())
}

// -- Tests --
