//! Tag operations

use super::Database;
use crate::error::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

/// A tag name shared across owners
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Association between a collection and a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionTag {
    pub id: i64,
    pub collection_id: i64,
    pub tag_id: i64,
}

/// Resolves the tag names attached to a collection
pub trait TagLookup {
    fn tags_for(&self, collection_id: i64) -> Result<Vec<String>>;
}

pub(crate) fn find_tag(conn: &Connection, name: &str) -> Result<Option<Tag>> {
    let tag = conn
        .query_row(
            "SELECT id, name FROM tags WHERE name = ?1",
            params![name],
            |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(tag)
}

pub(crate) fn find_or_create(conn: &Connection, name: &str) -> Result<Tag> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT OR IGNORE INTO tags (name, created_at) VALUES (?1, ?2)",
        params![name, now],
    )?;
    let tag = conn.query_row(
        "SELECT id, name FROM tags WHERE name = ?1",
        params![name],
        |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )?;
    Ok(tag)
}

pub(crate) fn associate(conn: &Connection, collection_id: i64, tag_id: i64) -> Result<CollectionTag> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT OR IGNORE INTO collection_tags (collection_id, tag_id, created_at)
         VALUES (?1, ?2, ?3)",
        params![collection_id, tag_id, now],
    )?;
    let link = conn.query_row(
        "SELECT id, collection_id, tag_id FROM collection_tags
         WHERE collection_id = ?1 AND tag_id = ?2",
        params![collection_id, tag_id],
        |row| {
            Ok(CollectionTag {
                id: row.get(0)?,
                collection_id: row.get(1)?,
                tag_id: row.get(2)?,
            })
        },
    )?;
    Ok(link)
}

/// Attach every non-blank name to the collection; returns the stored names in order
pub(crate) fn attach_tags(
    conn: &Connection,
    collection_id: i64,
    names: &[String],
) -> Result<Vec<String>> {
    let mut attached: Vec<String> = Vec::with_capacity(names.len());
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if attached.iter().any(|a| a == name) {
            continue;
        }
        let tag = find_or_create(conn, name)?;
        associate(conn, collection_id, tag.id)?;
        attached.push(tag.name);
    }
    Ok(attached)
}

impl Database {
    /// Existing tag with `name`, or a new one
    pub fn find_or_create_tag(&self, name: &str) -> Result<Tag> {
        find_or_create(&self.conn, name)
    }

    /// Link a collection to a tag; linking twice returns the existing row
    pub fn associate(&self, collection_id: i64, tag_id: i64) -> Result<CollectionTag> {
        associate(&self.conn, collection_id, tag_id)
    }

    /// Tag names of one collection, in association order
    pub fn collection_tags(&self, collection_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.name FROM collection_tags ct
             JOIN tags t ON t.id = ct.tag_id
             WHERE ct.collection_id = ?1
             ORDER BY ct.id",
        )?;
        let names = stmt
            .query_map(params![collection_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Distinct tags on an owner's live collections, sorted by name
    pub fn list_tags(&self, owner_id: i64) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT t.id, t.name FROM tags t
             JOIN collection_tags ct ON ct.tag_id = t.id
             JOIN collections c ON c.id = ct.collection_id
             WHERE c.owner_id = ?1 AND c.deleted_at IS NULL
             ORDER BY t.name",
        )?;
        let tags = stmt
            .query_map(params![owner_id], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tags)
    }
}

impl TagLookup for Database {
    fn tags_for(&self, collection_id: i64) -> Result<Vec<String>> {
        self.collection_tags(collection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use crate::db::CollectionFilter;

    fn db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn test_find_or_create_is_stable() {
        let db = db();
        let first = db.find_or_create_tag("rust").unwrap();
        let second = db.find_or_create_tag("rust").unwrap();
        assert_eq!(first, second);
        assert_ne!(db.find_or_create_tag("Rust").unwrap().id, first.id);
    }

    #[test]
    fn test_associate_twice_returns_same_link() {
        let db = db();
        let c = db
            .create_collection(1, "https://a", ContentKind::Text, "t", "d")
            .unwrap();
        let tag = db.find_or_create_tag("x").unwrap();
        let a = db.associate(c.id, tag.id).unwrap();
        let b = db.associate(c.id, tag.id).unwrap();
        assert_eq!(a, b);
        assert_eq!(db.collection_tags(c.id).unwrap(), vec!["x"]);
    }

    #[test]
    fn test_create_with_tags_trims_and_skips_blank() {
        let db = db();
        let tags = vec![" a ".to_string(), "".to_string(), "b".to_string(), "a".to_string()];
        let (c, stored) = db
            .create_collection_with_tags(1, "https://a", ContentKind::Text, "t", "d", &tags)
            .unwrap();
        assert_eq!(stored, vec!["a", "b"]);
        assert_eq!(db.collection_tags(c.id).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_tag_intersection_search() {
        let db = db();
        let both = vec!["x".to_string(), "y".to_string()];
        let only_x = vec!["x".to_string()];
        let (c1, _) = db
            .create_collection_with_tags(1, "https://1", ContentKind::Text, "one", "", &both)
            .unwrap();
        db.create_collection_with_tags(1, "https://2", ContentKind::Text, "two", "", &only_x)
            .unwrap();

        let found = db
            .search_collections(1, &CollectionFilter::new().with_tags(["x", "y"]))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, c1.id);

        let found = db
            .search_collections(1, &CollectionFilter::new().with_tags(["x"]))
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_list_tags_scoped_to_owner_and_live_rows() {
        let db = db();
        let (c1, _) = db
            .create_collection_with_tags(
                1,
                "https://1",
                ContentKind::Text,
                "t",
                "",
                &["zeta".to_string(), "alpha".to_string()],
            )
            .unwrap();
        db.create_collection_with_tags(2, "https://2", ContentKind::Text, "t", "", &["other".to_string()])
            .unwrap();

        let names: Vec<_> = db.list_tags(1).unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);

        db.delete_collection(1, c1.id).unwrap();
        assert!(db.list_tags(1).unwrap().is_empty());
    }
}
