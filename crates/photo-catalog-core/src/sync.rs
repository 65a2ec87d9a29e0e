//! Applies source→destination directory pairings: copies files missing from
//! the destination and optionally deletes destination files absent from the
//! source.
//!
//! Pairings run strictly sequentially in list order. With
//! `include_sub_folders`, every subdirectory becomes an implicit additional
//! pairing against the mirrored destination subdirectory, reported as its own
//! result entry, parents before their nested children.

use log::info;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fsops;
use crate::types::{StatusUpdate, SyncConfiguration, SyncDefinition, SyncResult};

/// Run every definition of the configuration, invoking `callback` once per
/// copied or deleted file.
pub fn execute(
    configuration: &SyncConfiguration,
    callback: &mut dyn FnMut(StatusUpdate),
) -> Result<Vec<SyncResult>> {
    let mut results = Vec::new();

    for definition in &configuration.definitions {
        let source = PathBuf::from(&definition.source_directory);
        if definition.source_directory.is_empty() || !fsops::folder_exists(&source) {
            results.push(SyncResult {
                source_directory: definition.source_directory.clone(),
                destination_directory: definition.destination_directory.clone(),
                synced_images: 0,
                message: format!(
                    "Source directory '{}' not found.",
                    definition.source_directory
                ),
            });
            continue;
        }

        if definition.destination_directory.is_empty() {
            // Sync of the remaining definitions continues; the result carries
            // the argument failure text instead of propagating it
            results.push(SyncResult {
                source_directory: definition.source_directory.clone(),
                destination_directory: definition.destination_directory.clone(),
                synced_images: 0,
                message: Error::InvalidArgument("path").to_string(),
            });
            continue;
        }

        sync_pairing(
            &source,
            &PathBuf::from(&definition.destination_directory),
            definition,
            &mut results,
            callback,
        )?;
    }

    Ok(results)
}

/// Sync one pairing and, recursively, its implicit subfolder pairings.
///
/// Each pairing appends exactly one result entry; children follow their
/// parent in the output list.
fn sync_pairing(
    source: &Path,
    destination: &Path,
    definition: &SyncDefinition,
    results: &mut Vec<SyncResult>,
    callback: &mut dyn FnMut(StatusUpdate),
) -> Result<()> {
    let source_names = fsops::get_file_names(source)?;
    let destination_names = if fsops::folder_exists(destination) {
        fsops::get_file_names(destination)?
    } else {
        Vec::new()
    };

    let mut synced_images = 0usize;

    for name in &source_names {
        if destination_names.contains(name) {
            continue;
        }
        let source_path = source.join(name);
        let destination_path = destination.join(name);
        fsops::copy_file(&source_path, &destination_path)?;
        synced_images += 1;
        callback(StatusUpdate::new(format!(
            "'{}' => '{}'",
            source_path.display(),
            destination_path.display()
        )));
    }

    if definition.delete_assets_not_in_source {
        for name in &destination_names {
            if source_names.contains(name) {
                continue;
            }
            let destination_path = destination.join(name);
            fsops::delete_file(&destination_path)?;
            synced_images += 1;
            callback(StatusUpdate::new(format!(
                "Deleted '{}'",
                destination_path.display()
            )));
        }
    }

    let message = match synced_images {
        0 => format!(
            "No images synced from '{}' to '{}'.",
            source.display(),
            destination.display()
        ),
        1 => format!(
            "1 image synced from '{}' to '{}'.",
            source.display(),
            destination.display()
        ),
        n => format!(
            "{} images synced from '{}' to '{}'.",
            n,
            source.display(),
            destination.display()
        ),
    };
    info!("{}", message);

    results.push(SyncResult {
        source_directory: source.to_string_lossy().into_owned(),
        destination_directory: destination.to_string_lossy().into_owned(),
        synced_images,
        message,
    });

    if definition.include_sub_folders {
        for sub_source in fsops::get_sub_directories(source)? {
            let sub_name = sub_source
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_default();
            let sub_destination = destination.join(sub_name);
            sync_pairing(&sub_source, &sub_destination, definition, results, callback)?;
        }
    }

    Ok(())
}

// -- Tests --
