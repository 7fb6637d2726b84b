//! Collection operations

use super::Database;
use crate::content::ContentKind;
use crate::error::{Result, ToReadError};
use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef};
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row, ToSql};
use serde::Serialize;

/// A user's saved URL with its derived metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub id: i64,
    pub owner_id: i64,
    pub url: String,
    pub kind: ContentKind,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Search criteria for `search_collections`
#[derive(Debug, Clone, Default)]
pub struct CollectionFilter {
    /// Case-insensitive substring of title or description
    pub keyword: Option<String>,
    /// Every listed tag must be attached
    pub tags: Vec<String>,
}

impl CollectionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    fn tag_names(&self) -> Vec<&str> {
        self.tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl ToSql for ContentKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ContentKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: ToReadError| FromSqlError::Other(Box::new(e)))
    }
}

const SELECT_COLUMNS: &str =
    "c.id, c.owner_id, c.url, c.kind, c.title, c.description, c.created_at, c.updated_at";

fn row_to_collection(row: &Row<'_>) -> rusqlite::Result<Collection> {
    Ok(Collection {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        url: row.get(2)?,
        kind: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Insert a live collection; a second live row for (owner, url) is a duplicate
pub(crate) fn insert_collection(
    conn: &Connection,
    owner_id: i64,
    url: &str,
    kind: ContentKind,
    title: &str,
    description: &str,
) -> Result<Collection> {
    let now = Utc::now().to_rfc3339();
    let inserted = conn.execute(
        "INSERT INTO collections (owner_id, url, kind, title, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![owner_id, url, kind, title, description, now],
    );

    match inserted {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            return Err(ToReadError::DuplicateCollection(url.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Collection {
        id: conn.last_insert_rowid(),
        owner_id,
        url: url.to_string(),
        kind,
        title: title.to_string(),
        description: description.to_string(),
        created_at: now.clone(),
        updated_at: now,
    })
}

pub(crate) fn find_by_url(conn: &Connection, owner_id: i64, url: &str) -> Result<Option<Collection>> {
    let sql = format!(
        "SELECT {} FROM collections c
         WHERE c.owner_id = ?1 AND c.url = ?2 AND c.deleted_at IS NULL",
        SELECT_COLUMNS
    );
    let found = conn
        .query_row(&sql, params![owner_id, url], row_to_collection)
        .optional()?;
    Ok(found)
}

pub(crate) fn search(
    conn: &Connection,
    owner_id: i64,
    filter: &CollectionFilter,
) -> Result<Vec<Collection>> {
    let mut sql = format!(
        "SELECT {} FROM collections c WHERE c.owner_id = ? AND c.deleted_at IS NULL",
        SELECT_COLUMNS
    );
    let mut values: Vec<Value> = vec![Value::Integer(owner_id)];

    if let Some(keyword) = filter.keyword() {
        sql.push_str(
            " AND (instr(unicode_lower(c.title), ?) > 0 OR instr(unicode_lower(c.description), ?) > 0)",
        );
        let keyword = keyword.to_lowercase();
        values.push(Value::Text(keyword.clone()));
        values.push(Value::Text(keyword));
    }

    for name in filter.tag_names() {
        // An unknown tag can never be attached, so nothing can match
        let Some(tag) = super::tags::find_tag(conn, name)? else {
            return Ok(Vec::new());
        };
        sql.push_str(" AND c.id IN (SELECT collection_id FROM collection_tags WHERE tag_id = ?)");
        values.push(Value::Integer(tag.id));
    }

    sql.push_str(" ORDER BY c.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let results = stmt
        .query_map(params_from_iter(values.iter()), row_to_collection)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(results)
}

impl Database {
    /// Create a collection with no tags
    pub fn create_collection(
        &self,
        owner_id: i64,
        url: &str,
        kind: ContentKind,
        title: &str,
        description: &str,
    ) -> Result<Collection> {
        insert_collection(&self.conn, owner_id, url, kind, title, description)
    }

    /// Create a collection and attach its tags atomically
    pub fn create_collection_with_tags(
        &self,
        owner_id: i64,
        url: &str,
        kind: ContentKind,
        title: &str,
        description: &str,
        tags: &[String],
    ) -> Result<(Collection, Vec<String>)> {
        self.with_transaction(|conn| {
            let collection = insert_collection(conn, owner_id, url, kind, title, description)?;
            let names = super::tags::attach_tags(conn, collection.id, tags)?;
            Ok((collection, names))
        })
    }

    /// Live collection for (owner, url), if any
    pub fn find_collection_by_url(&self, owner_id: i64, url: &str) -> Result<Option<Collection>> {
        find_by_url(&self.conn, owner_id, url)
    }

    /// Owner's live collections matching the filter, newest first
    pub fn search_collections(
        &self,
        owner_id: i64,
        filter: &CollectionFilter,
    ) -> Result<Vec<Collection>> {
        search(&self.conn, owner_id, filter)
    }

    /// Soft-delete; returns false when no live row owned by `owner_id` has `id`
    pub fn delete_collection(&self, owner_id: i64, id: i64) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        let rows = self.conn.execute(
            "UPDATE collections SET deleted_at = ?3, updated_at = ?3
             WHERE id = ?1 AND owner_id = ?2 AND deleted_at IS NULL",
            params![id, owner_id, now],
        )?;
        Ok(rows > 0)
    }

    /// Number of live collections for an owner
    pub fn count_collections(&self, owner_id: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM collections WHERE owner_id = ?1 AND deleted_at IS NULL",
            params![owner_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
