//! Comment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist article-scoped comments.
//! - Load author-enriched comment views.
//!
//! # Invariants
//! - Comments are listed newest first; equal timestamps fall back to later
//!   insertion first (`rowid DESC`).
//! - Creating a comment checks parent article and author inside the same
//!   transaction as the insert.

use crate::model::article::ArticleId;
use crate::model::comment::{Comment, CommentId, CommentView};
use crate::model::resource::Resource;
use crate::model::user::Author;
use crate::repo::{article_exists, ensure_tables, parse_uuid, user_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const COMMENT_VIEW_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.article_id AS article_id,
    c.author_id AS author_id,
    c.content AS content,
    c.created_at AS created_at,
    c.updated_at AS updated_at,
    u.username AS author_username
FROM comments c
INNER JOIN users u ON u.id = c.author_id";

/// Repository interface for comments.
pub trait CommentRepository {
    /// Inserts one comment after confirming its article and author exist.
    fn create_comment(&self, comment: &Comment) -> RepoResult<CommentId>;
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    fn get_comment_view(&self, id: CommentId) -> RepoResult<Option<CommentView>>;
    fn list_comment_views(&self, article_id: ArticleId) -> RepoResult<Vec<CommentView>>;
    fn update_comment_content(&self, id: CommentId, content: &str, now_ms: i64)
        -> RepoResult<()>;
    fn delete_comment(&self, id: CommentId) -> RepoResult<()>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["comments", "articles", "users"])?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn create_comment(&self, comment: &Comment) -> RepoResult<CommentId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !article_exists(&tx, comment.article_id)? {
            return Err(RepoError::NotFound(Resource::Article(comment.article_id)));
        }
        if !user_exists(&tx, comment.author_id)? {
            return Err(RepoError::NotFound(Resource::User(comment.author_id)));
        }

        tx.execute(
            "INSERT INTO comments (id, article_id, author_id, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                comment.id.to_string(),
                comment.article_id.to_string(),
                comment.author_id.to_string(),
                comment.content.as_str(),
                comment.created_at,
                comment.updated_at,
            ],
        )?;
        tx.commit()?;
        Ok(comment.id)
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.get_comment_view(id)?.map(|view| view.comment))
    }

    fn get_comment_view(&self, id: CommentId) -> RepoResult<Option<CommentView>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_VIEW_SELECT_SQL} WHERE c.id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_comment_view_row(row)?));
        }
        Ok(None)
    }

    fn list_comment_views(&self, article_id: ArticleId) -> RepoResult<Vec<CommentView>> {
        load_comment_views(self.conn, article_id.to_string().as_str())
    }

    fn update_comment_content(
        &self,
        id: CommentId,
        content: &str,
        now_ms: i64,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE comments SET content = ?2, updated_at = ?3 WHERE id = ?1;",
            params![id.to_string(), content, now_ms],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(Resource::Comment(id)));
        }
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(Resource::Comment(id)));
        }
        Ok(())
    }
}

/// Loads author-enriched comments of one article, newest first.
pub(crate) fn load_comment_views(
    conn: &Connection,
    article_id: &str,
) -> RepoResult<Vec<CommentView>> {
    let mut stmt = conn.prepare(&format!(
        "{COMMENT_VIEW_SELECT_SQL}
         WHERE c.article_id = ?1
         ORDER BY c.created_at DESC, c.rowid DESC;"
    ))?;
    let mut rows = stmt.query([article_id])?;
    let mut comments = Vec::new();
    while let Some(row) = rows.next()? {
        comments.push(parse_comment_view_row(row)?);
    }
    Ok(comments)
}

fn parse_comment_view_row(row: &Row<'_>) -> RepoResult<CommentView> {
    let id_text: String = row.get("id")?;
    let article_text: String = row.get("article_id")?;
    let author_text: String = row.get("author_id")?;
    let author_id = parse_uuid(&author_text, "comments.author_id")?;

    Ok(CommentView {
        comment: Comment {
            id: parse_uuid(&id_text, "comments.id")?,
            article_id: parse_uuid(&article_text, "comments.article_id")?,
            author_id,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        },
        author: Author {
            id: author_id,
            username: row.get("author_username")?,
        },
    })
}
