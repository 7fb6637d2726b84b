//! Database layer for toread
//!
//! SQLite storage for collections, tags and their associations.
//! Deleting a collection only marks it; the (owner, url) slot is then free again.

mod collections;
mod schema;
mod tags;

pub use collections::{Collection, CollectionFilter};
pub use schema::Database;
pub use tags::{CollectionTag, Tag, TagLookup};
use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("toread.sqlite")
    }
}
