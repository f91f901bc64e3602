//! Tag registry repository.
//!
//! # Responsibility
//! - Persist seeded tags and report their article association counts.
//! - Provide tag resolution helpers used inside article transactions.
//!
//! # Invariants
//! - Listing order is `name COLLATE NOCASE ASC, id ASC`.
//! - Tag links are owned by `article_tags` and vanish with their article.

use crate::db::now_epoch_ms;
use crate::model::tag::{Tag, TagId, TagSummary};
use crate::repo::{ensure_tables, parse_uuid, row_exists, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for the tag registry.
pub trait TagRepository {
    fn create_tag(&self, tag: &Tag) -> RepoResult<TagId>;
    fn list_tag_summaries(&self) -> RepoResult<Vec<TagSummary>>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["tags", "article_tags"])?;
        Ok(Self { conn })
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn create_tag(&self, tag: &Tag) -> RepoResult<TagId> {
        self.conn.execute(
            "INSERT INTO tags (id, name, created_at) VALUES (?1, ?2, ?3);",
            params![tag.id.to_string(), tag.name.as_str(), now_epoch_ms()],
        )?;
        Ok(tag.id)
    }

    fn list_tag_summaries(&self) -> RepoResult<Vec<TagSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                t.id AS id,
                t.name AS name,
                COUNT(at.article_id) AS article_count
             FROM tags t
             LEFT JOIN article_tags at ON at.tag_id = t.id
             GROUP BY t.id, t.name
             ORDER BY t.name COLLATE NOCASE ASC, t.id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            summaries.push(TagSummary {
                tag: Tag {
                    id: parse_uuid(&id_text, "tags.id")?,
                    name: row.get("name")?,
                },
                article_count: row.get("article_count")?,
            });
        }
        Ok(summaries)
    }
}

/// Returns the first id in `tag_ids` with no matching tag row.
pub(crate) fn first_missing_tag(conn: &Connection, tag_ids: &[TagId]) -> RepoResult<Option<TagId>> {
    for tag_id in tag_ids {
        let exists = row_exists(
            conn,
            "SELECT EXISTS(SELECT 1 FROM tags WHERE id = ?1);",
            tag_id.to_string().as_str(),
        )?;
        if !exists {
            return Ok(Some(*tag_id));
        }
    }
    Ok(None)
}

/// Replaces every tag link of one article. Caller owns the transaction.
pub(crate) fn replace_article_tags(
    conn: &Connection,
    article_id: &str,
    tag_ids: &[TagId],
) -> RepoResult<()> {
    conn.execute(
        "DELETE FROM article_tags WHERE article_id = ?1;",
        [article_id],
    )?;
    let mut insert = conn.prepare(
        "INSERT INTO article_tags (article_id, tag_id) VALUES (?1, ?2);",
    )?;
    for tag_id in tag_ids {
        insert.execute(params![article_id, tag_id.to_string()])?;
    }
    Ok(())
}

pub(crate) fn load_tags_for_article(conn: &Connection, article_id: &str) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name
         FROM article_tags at
         INNER JOIN tags t ON t.id = at.tag_id
         WHERE at.article_id = ?1
         ORDER BY t.name COLLATE NOCASE ASC, t.id ASC;",
    )?;
    let mut rows = stmt.query([article_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        let id_text: String = row.get(0)?;
        tags.push(Tag {
            id: parse_uuid(&id_text, "tags.id")?,
            name: row.get(1)?,
        });
    }
    Ok(tags)
}
