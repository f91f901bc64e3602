//! Public error taxonomy of the core.
//!
//! # Invariants
//! - Every failure is terminal for the call that produced it; the core
//!   never retries.
//! - Multi-step mutations either fully apply or report an error.

use crate::guard::OwnershipDenied;
use crate::model::resource::Resource;
use crate::model::user::UserId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by every service operation.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced article, comment, tag, user or like does not exist.
    NotFound(Resource),
    /// Requester is not the author of the resource it tried to mutate.
    Forbidden {
        resource: Resource,
        requester: UserId,
    },
    /// Uniqueness violation (duplicate like, taken user handle).
    Conflict(Resource),
    /// Input rejected before reaching storage.
    InvalidInput(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but its read-back did not.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(resource) => write!(f, "{resource} not found"),
            Self::Forbidden {
                resource,
                requester,
            } => write!(f, "user {requester} may not modify {resource}"),
            Self::Conflict(resource) => write!(f, "{resource} already exists"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(resource) => Self::NotFound(resource),
            RepoError::Conflict(resource) => Self::Conflict(resource),
            other => Self::Repo(other),
        }
    }
}

impl From<OwnershipDenied> for ServiceError {
    fn from(value: OwnershipDenied) -> Self {
        Self::Forbidden {
            resource: value.resource,
            requester: value.requester,
        }
    }
}

impl ServiceError {
    /// Stable short code for logs and outer adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Forbidden { .. } => "forbidden",
            Self::Conflict(_) => "conflict",
            Self::InvalidInput(_) => "invalid_input",
            Self::Repo(_) => "storage_error",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::guard::OwnershipDenied;
    use crate::model::resource::Resource;
    use crate::repo::RepoError;
    use uuid::Uuid;

    #[test]
    fn repo_semantic_errors_lift_to_service_variants() {
        let id = Uuid::new_v4();
        let not_found = ServiceError::from(RepoError::NotFound(Resource::Article(id)));
        assert!(matches!(not_found, ServiceError::NotFound(Resource::Article(found)) if found == id));

        let conflict = ServiceError::from(RepoError::Conflict(Resource::UserHandle("a".into())));
        assert_eq!(conflict.code(), "conflict");

        let transport = ServiceError::from(RepoError::InvalidData("bad".into()));
        assert_eq!(transport.code(), "storage_error");
    }

    #[test]
    fn ownership_denial_becomes_forbidden() {
        let requester = Uuid::new_v4();
        let comment = Uuid::new_v4();
        let err = ServiceError::from(OwnershipDenied {
            resource: Resource::Comment(comment),
            requester,
        });
        assert_eq!(err.code(), "forbidden");
        assert!(err.to_string().contains(&requester.to_string()));
    }
}
