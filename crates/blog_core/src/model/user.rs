//! User records consumed from the identity collaborator.
//!
//! The core stores only what it needs to resolve authors: no credentials,
//! no profile data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an authenticated actor.
pub type UserId = Uuid;

/// Registered user as stored by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub created_at: i64,
}

/// Public author projection embedded in enriched views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: UserId,
    pub username: String,
}

/// Registration input for the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
        }
    }
}
