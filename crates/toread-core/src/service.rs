//! Collection use cases: save, browse, report and remove

use crate::content::ContentKind;
use crate::db::{Collection, CollectionFilter, Database};
use crate::error::{Result, ToReadError};
use crate::processor::ContentProcessor;
use crate::summary::AggregateSummaryBuilder;
use serde::Serialize;

/// A collection with its tag names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionListItem {
    #[serde(flatten)]
    pub collection: Collection,
    pub tags: Vec<String>,
}

pub struct CollectionService {
    db: Database,
    processor: ContentProcessor,
    summaries: AggregateSummaryBuilder,
}

impl CollectionService {
    pub fn new(db: Database, processor: ContentProcessor) -> Self {
        let summaries = AggregateSummaryBuilder::new(processor.extractor(), processor.config());
        Self {
            db,
            processor,
            summaries,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Save `url` for `owner`: summarize it, then store it with its tags
    pub async fn add(&self, owner_id: i64, url: &str) -> Result<CollectionListItem> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ToReadError::InvalidInput("URL is required".to_string()));
        }

        if self.db.find_collection_by_url(owner_id, url)?.is_some() {
            return Err(ToReadError::DuplicateCollection(url.to_string()));
        }

        let summary = self.processor.process_url(url).await.map_err(|e| {
            tracing::warn!(url = %url, "Failed to process URL: {}", e);
            e
        })?;

        let kind: ContentKind = summary.kind.parse()?;
        let (collection, tags) = self.db.create_collection_with_tags(
            owner_id,
            url,
            kind,
            &summary.title,
            &summary.description,
            &summary.tags,
        )?;

        tracing::info!(id = collection.id, url = %url, "Saved collection");
        Ok(CollectionListItem { collection, tags })
    }

    /// Matching collections with their tags; items whose tags fail to load are left out
    pub fn list(&self, owner_id: i64, filter: &CollectionFilter) -> Result<Vec<CollectionListItem>> {
        let collections = self.db.search_collections(owner_id, filter)?;
        let mut items = Vec::with_capacity(collections.len());

        for collection in collections {
            match self.db.collection_tags(collection.id) {
                Ok(tags) => items.push(CollectionListItem { collection, tags }),
                Err(e) => {
                    tracing::warn!(
                        collection_id = collection.id,
                        "Failed to get tags for collection: {}",
                        e
                    );
                }
            }
        }

        Ok(items)
    }

    /// One report over every collection matching the filter
    pub async fn summarize(&self, owner_id: i64, filter: &CollectionFilter) -> Result<String> {
        let collections = self.db.search_collections(owner_id, filter)?;
        self.summaries.summarize(&self.db, &collections).await
    }

    /// Tag names on the owner's live collections, sorted
    pub fn tags(&self, owner_id: i64) -> Result<Vec<String>> {
        Ok(self
            .db
            .list_tags(owner_id)?
            .into_iter()
            .map(|t| t.name)
            .collect())
    }

    /// Soft-delete one of the owner's collections
    pub fn remove(&self, owner_id: i64, id: i64) -> Result<()> {
        if self.db.delete_collection(owner_id, id)? {
            tracing::info!(id, "Removed collection");
            Ok(())
        } else {
            Err(ToReadError::CollectionNotFound(id))
        }
    }
}
