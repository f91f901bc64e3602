//! Authorship guard for mutating operations.
//!
//! # Responsibility
//! - Decide whether an actor may mutate an authored resource.
//!
//! # Invariants
//! - Ownership is the only authorization axis: no roles, no admin override.
//! - A comment's mutability depends on the comment author only, never on the
//!   parent article's author.

use crate::model::article::Article;
use crate::model::comment::Comment;
use crate::model::resource::Resource;
use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Returns whether `requester_id` authored the resource.
pub fn is_owner(resource_author_id: UserId, requester_id: UserId) -> bool {
    resource_author_id == requester_id
}

/// Resource with a single immutable author.
pub trait Owned {
    fn author_id(&self) -> UserId;
    fn resource(&self) -> Resource;
}

impl Owned for Article {
    fn author_id(&self) -> UserId {
        self.author_id
    }

    fn resource(&self) -> Resource {
        Resource::Article(self.id)
    }
}

impl Owned for Comment {
    fn author_id(&self) -> UserId {
        self.author_id
    }

    fn resource(&self) -> Resource {
        Resource::Comment(self.id)
    }
}

/// Denial raised when the requester is not the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipDenied {
    pub resource: Resource,
    pub requester: UserId,
}

impl Display for OwnershipDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "user {} is not the author of {}",
            self.requester, self.resource
        )
    }
}

impl Error for OwnershipDenied {}

/// Fails unless `requester_id` authored `resource`.
pub fn ensure_owner(resource: &impl Owned, requester_id: UserId) -> Result<(), OwnershipDenied> {
    if is_owner(resource.author_id(), requester_id) {
        return Ok(());
    }

    Err(OwnershipDenied {
        resource: resource.resource(),
        requester: requester_id,
    })
}
