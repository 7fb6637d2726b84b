//! Tag frequency ranking across a set of collections

use crate::db::{Collection, TagLookup};
use std::collections::HashMap;

/// How many tags the aggregate prompt mentions
pub const TOP_TAG_LIMIT: usize = 5;

/// A tag name and how many of the collections carry it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Count tags over `collections`, most frequent first, ties broken by name.
///
/// Collections whose tags cannot be looked up are skipped.
pub fn count_tags(lookup: &dyn TagLookup, collections: &[Collection]) -> Vec<TagCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for collection in collections {
        match lookup.tags_for(collection.id) {
            Ok(tags) => {
                for tag in tags {
                    *counts.entry(tag).or_insert(0) += 1;
                }
            }
            Err(e) => {
                tracing::warn!(
                    collection_id = collection.id,
                    "Skipping collection in tag ranking: {}",
                    e
                );
            }
        }
    }

    let mut ranked: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount { name, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// The `limit` most frequent tag names
pub fn rank_tags(lookup: &dyn TagLookup, collections: &[Collection], limit: usize) -> Vec<String> {
    count_tags(lookup, collections)
        .into_iter()
        .take(limit)
        .map(|t| t.name)
        .collect()
}
