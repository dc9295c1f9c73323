//! Merging a freshly fetched feed snapshot into the stored one.

use std::collections::HashMap;

use podcat_model::copy_model;

use super::feed::Feed;

/// Feed-level fields a snapshot never overwrites.
const MERGE_IGNORED: &[&str] = &["id", "items", "modification_time"];

/// Merge `incoming` into a copy of `existing`.
///
/// Items are matched by GUID: matching items take the incoming content, items
/// only in `existing` are kept, and new items are appended in incoming order.
pub fn merge_feeds(existing: &Feed, incoming: &Feed) -> Feed {
    let mut merged = existing.clone();
    copy_model(&mut merged, incoming, MERGE_IGNORED);

    let mut positions: HashMap<String, usize> = merged
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.guid.clone(), i))
        .collect();

    for item in &incoming.items {
        match positions.get(&item.guid) {
            Some(&i) => {
                copy_model(&mut merged.items[i], item, &[]);
            }
            None => {
                positions.insert(item.guid.clone(), merged.items.len());
                merged.items.push(item.clone());
            }
        }
    }

    merged
}
