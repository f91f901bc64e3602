//! User directory use-case service.
//!
//! Stands in for the identity collaborator: it only registers and resolves
//! the users that articles, comments and likes point at.

use crate::db::now_epoch_ms;
use crate::model::resource::Resource;
use crate::model::user::{NewUser, User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};
use uuid::Uuid;

pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a user.
    ///
    /// # Errors
    /// - `InvalidInput` when email or username is blank.
    /// - `Conflict` when the email or username is already taken.
    pub fn register(&self, input: NewUser) -> ServiceResult<User> {
        let email = input.email.trim();
        let username = input.username.trim();
        if email.is_empty() || username.is_empty() {
            return Err(ServiceError::InvalidInput(
                "email and username must not be blank".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            created_at: now_epoch_ms(),
        };
        self.repo
            .create_user(&user)
            .map_err(ServiceError::from)
            .inspect_err(|err| {
                warn!(
                    "event=user_register module=user status=error error_code={}",
                    err.code()
                );
            })?;

        info!("event=user_register module=user status=ok user_id={}", user.id);
        Ok(user)
    }

    pub fn get(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .get_user(id)?
            .ok_or(ServiceError::NotFound(Resource::User(id)))
    }
}
