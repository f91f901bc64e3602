//! User directory repository.
//!
//! # Responsibility
//! - Persist the minimal user records needed to resolve authors.
//!
//! # Invariants
//! - Email and username are unique (case-insensitive); duplicates surface as
//!   `RepoError::Conflict`.

use crate::model::resource::Resource;
use crate::model::user::{User, UserId};
use crate::repo::{ensure_tables, is_constraint_violation, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for user records.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["users"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        let inserted = self.conn.execute(
            "INSERT INTO users (id, email, username, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                user.id.to_string(),
                user.email.as_str(),
                user.username.as_str(),
                user.created_at,
            ],
        );

        match inserted {
            Ok(_) => Ok(user.id),
            Err(err) if is_constraint_violation(&err) => Err(RepoError::Conflict(
                Resource::UserHandle(user.username.clone()),
            )),
            Err(err) => Err(err.into()),
        }
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, email, username, created_at FROM users WHERE id = ?1;",
                [id.to_string()],
                RawUser::from_row,
            )
            .optional()?;

        row.map(RawUser::into_user).transpose()
    }
}

struct RawUser {
    id: String,
    email: String,
    username: String,
    created_at: i64,
}

impl RawUser {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            email: row.get("email")?,
            username: row.get("username")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_user(self) -> RepoResult<User> {
        Ok(User {
            id: parse_uuid(&self.id, "users.id")?,
            email: self.email,
            username: self.username,
            created_at: self.created_at,
        })
    }
}
