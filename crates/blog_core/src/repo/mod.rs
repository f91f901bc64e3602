//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//! - Translate storage constraint failures into semantic errors.
//!
//! # Invariants
//! - Multi-statement writes run inside one `IMMEDIATE` transaction.
//! - Multi-statement reads run inside one deferred transaction so enriched
//!   views come from a single snapshot.
//! - Uniqueness (likes, user handles) is enforced by storage constraints and
//!   surfaces as `RepoError::Conflict`.

use crate::db::DbError;
use crate::model::resource::Resource;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod article_repo;
pub mod comment_repo;
pub mod like_repo;
pub mod tag_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every table-level repository.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(Resource),
    Conflict(Resource),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(resource) => write!(f, "{resource} not found"),
            Self::Conflict(resource) => write!(f, "{resource} already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

pub(crate) fn row_exists(conn: &Connection, sql: &str, id: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(sql, [id], |row| row.get(0))?;
    Ok(exists == 1)
}

pub(crate) fn user_exists(conn: &Connection, user_id: Uuid) -> RepoResult<bool> {
    row_exists(
        conn,
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1);",
        user_id.to_string().as_str(),
    )
}

pub(crate) fn article_exists(conn: &Connection, article_id: Uuid) -> RepoResult<bool> {
    row_exists(
        conn,
        "SELECT EXISTS(SELECT 1 FROM articles WHERE id = ?1);",
        article_id.to_string().as_str(),
    )
}

/// Rejects connections whose schema lacks any of `tables`.
pub(crate) fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for table in tables {
        let exists = row_exists(
            conn,
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            table,
        )?;
        if !exists {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
