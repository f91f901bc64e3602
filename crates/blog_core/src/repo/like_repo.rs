//! Like ledger repository.
//!
//! # Responsibility
//! - Maintain the `(user_id, article_id)` membership set.
//!
//! # Invariants
//! - At most one row per pair, enforced by the table's primary key. A
//!   duplicate insert fails at the storage layer and maps to
//!   `RepoError::Conflict`; there is no read-then-write uniqueness check.

use crate::model::article::ArticleId;
use crate::model::like::Like;
use crate::model::resource::Resource;
use crate::model::user::UserId;
use crate::repo::{
    article_exists, ensure_tables, is_constraint_violation, parse_uuid, user_exists, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// Repository interface for likes.
pub trait LikeRepository {
    /// Inserts one like; duplicates yield `Conflict`.
    fn insert_like(&self, like: &Like) -> RepoResult<()>;
    /// Removes one like; a missing pair yields `NotFound`.
    fn delete_like(&self, user_id: UserId, article_id: ArticleId) -> RepoResult<()>;
    fn has_like(&self, user_id: UserId, article_id: ArticleId) -> RepoResult<bool>;
}

/// SQLite-backed like repository.
pub struct SqliteLikeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLikeRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["likes", "articles", "users"])?;
        Ok(Self { conn })
    }
}

impl LikeRepository for SqliteLikeRepository<'_> {
    fn insert_like(&self, like: &Like) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !article_exists(&tx, like.article_id)? {
            return Err(RepoError::NotFound(Resource::Article(like.article_id)));
        }
        if !user_exists(&tx, like.user_id)? {
            return Err(RepoError::NotFound(Resource::User(like.user_id)));
        }

        let inserted = tx.execute(
            "INSERT INTO likes (user_id, article_id, created_at) VALUES (?1, ?2, ?3);",
            params![
                like.user_id.to_string(),
                like.article_id.to_string(),
                like.created_at,
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => {
                return Err(RepoError::Conflict(Resource::Like {
                    user_id: like.user_id,
                    article_id: like.article_id,
                }));
            }
            Err(err) => return Err(err.into()),
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_like(&self, user_id: UserId, article_id: ArticleId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM likes WHERE user_id = ?1 AND article_id = ?2;",
            params![user_id.to_string(), article_id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(Resource::Like {
                user_id,
                article_id,
            }));
        }
        Ok(())
    }

    fn has_like(&self, user_id: UserId, article_id: ArticleId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = ?1 AND article_id = ?2);",
            params![user_id.to_string(), article_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

/// Loads every like of one article, oldest first.
pub(crate) fn load_likes_for_article(conn: &Connection, article_id: &str) -> RepoResult<Vec<Like>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, article_id, created_at
         FROM likes
         WHERE article_id = ?1
         ORDER BY created_at ASC, user_id ASC;",
    )?;
    let mut rows = stmt.query([article_id])?;
    let mut likes = Vec::new();
    while let Some(row) = rows.next()? {
        let user_text: String = row.get(0)?;
        let article_text: String = row.get(1)?;
        likes.push(Like {
            user_id: parse_uuid(&user_text, "likes.user_id")?,
            article_id: parse_uuid(&article_text, "likes.article_id")?,
            created_at: row.get(2)?,
        });
    }
    Ok(likes)
}
