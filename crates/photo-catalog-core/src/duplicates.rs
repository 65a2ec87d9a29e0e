//! Finds potential duplicate assets by grouping them on their identity hash.

use std::collections::HashMap;

use crate::types::Asset;

/// Group catalogued assets by hash.
///
/// Returns one group per hash with two or more members, groups ordered by the
/// first appearance of their hash in the input, members in input order. All
/// hashes are assumed to come from the single configured algorithm; there is
/// no cross-algorithm comparison.
pub fn find_duplicated_assets(assets: &[Asset]) -> Vec<Vec<Asset>> {
    let mut groups: HashMap<&str, Vec<Asset>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for asset in assets {
        let entry = groups.entry(asset.hash.as_str()).or_default();
        if entry.is_empty() {
            order.push(asset.hash.as_str());
        }
        entry.push(asset.clone());
    }

    order
        .into_iter()
        .filter_map(|hash| {
            let group = groups.remove(hash)?;
            (group.len() > 1).then_some(group)
        })
        .collect()
}

// -- Tests --
