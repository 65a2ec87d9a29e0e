//! Compares catalogued asset timestamps against the files on disk.

use chrono::{DateTime, Utc};
use log::warn;

use crate::error::Result;
use crate::fsops;
use crate::types::Asset;

/// Date-only staleness test: the thumbnail is stale when it was generated
/// strictly before the file's creation or modification date.
fn is_stale(thumbnail: DateTime<Utc>, created: DateTime<Utc>, modified: DateTime<Utc>) -> bool {
    let thumb_date = thumbnail.date_naive();
    thumb_date < created.date_naive() || thumb_date < modified.date_naive()
}

/// Names of the catalogued assets whose files changed on disk since their
/// thumbnail was generated.
///
/// Stale assets get their file timestamps refreshed in place; the result
/// preserves input order and is not de-duplicated. Files that vanished from
/// disk are skipped here (the cataloging deletion pass owns those).
pub fn get_updated_file_names(cataloged_assets: &mut [Asset]) -> Result<Vec<String>> {
    let mut updated = Vec::new();

    for asset in cataloged_assets.iter_mut() {
        let full_path = asset.full_path();
        let (created, modified, _) = match fsops::file_times(&full_path) {
            Ok(times) => times,
            Err(e) => {
                warn!("Skipping comparison for {}: {}", full_path.display(), e);
                continue;
            }
        };

        if is_stale(asset.thumbnail_creation, created, modified) {
            asset.file_creation = created;
            asset.file_modification = modified;
            updated.push(asset.file_name.clone());
        }
    }

    Ok(updated)
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use crate::types::Folder;
    use chrono::Duration;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_input_yields_empty_output() {
        let mut assets: Vec<Asset> = Vec::new();
        assert!(get_updated_file_names(&mut assets).unwrap().is_empty());
    }

    #[test]
    fn test_stale_thumbnail_is_reported_and_refreshed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("old.jpg"), b"x").unwrap();

        let folder = Folder::new(dir.path().to_path_buf());
        let mut asset = test_utils::asset_in(&folder, "old.jpg", "h");
        // Thumbnail generated long before the file's on-disk dates
        asset.thumbnail_creation = Utc::now() - Duration::days(30);
        let stale_creation = asset.file_creation - Duration::days(60);
        asset.file_creation = stale_creation;

        let mut assets = vec![asset];
        let updated = get_updated_file_names(&mut assets).unwrap();
        assert_eq!(updated, vec!["old.jpg".to_string()]);
        // Timestamps were refreshed from disk
        assert!(assets[0].file_creation > stale_creation);
    }

    #[test]
    fn test_fresh_thumbnail_is_excluded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fresh.jpg"), b"x").unwrap();

        let folder = Folder::new(dir.path().to_path_buf());
        let mut asset = test_utils::asset_in(&folder, "fresh.jpg", "h");
        // Same-day-or-later thumbnail is up to date
        asset.thumbnail_creation = Utc::now();

        let mut assets = vec![asset];
        assert!(get_updated_file_names(&mut assets).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempdir().unwrap();
        let folder = Folder::new(dir.path().to_path_buf());
        let mut asset = test_utils::asset_in(&folder, "vanished.jpg", "h");
        asset.thumbnail_creation = Utc::now() - Duration::days(30);

        let mut assets = vec![asset];
        assert!(get_updated_file_names(&mut assets).unwrap().is_empty());
    }

    #[test]
    fn test_result_preserves_input_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();

        let folder = Folder::new(dir.path().to_path_buf());
        let mut assets: Vec<Asset> = ["b.jpg", "a.jpg"]
            .iter()
            .map(|name| {
                let mut asset = test_utils::asset_in(&folder, name, "h");
                asset.thumbnail_creation = Utc::now() - Duration::days(30);
                asset
            })
            .collect();

        let updated = get_updated_file_names(&mut assets).unwrap();
        assert_eq!(updated, vec!["b.jpg".to_string(), "a.jpg".to_string()]);
    }
}
