//! Like ledger use-case service.
//!
//! # Invariants
//! - One like per `(user, article)` pair; a second like is a `Conflict`.
//! - Unliking a pair that is not present is `NotFound`.

use crate::db::now_epoch_ms;
use crate::model::article::ArticleId;
use crate::model::like::Like;
use crate::model::user::UserId;
use crate::repo::like_repo::LikeRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Like ledger facade over repository implementations.
pub struct LikeService<R: LikeRepository> {
    repo: R,
}

impl<R: LikeRepository> LikeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records `user_id` liking `article_id`.
    pub fn like(&self, article_id: ArticleId, user_id: UserId) -> ServiceResult<Like> {
        let like = Like {
            user_id,
            article_id,
            created_at: now_epoch_ms(),
        };
        self.repo
            .insert_like(&like)
            .map_err(ServiceError::from)
            .inspect_err(|err| {
                warn!(
                    "event=article_like module=like status=error article_id={article_id} error_code={}",
                    err.code()
                );
            })?;

        info!("event=article_like module=like status=ok article_id={article_id}");
        Ok(like)
    }

    /// Removes `user_id`'s like on `article_id`.
    pub fn unlike(&self, article_id: ArticleId, user_id: UserId) -> ServiceResult<()> {
        self.repo.delete_like(user_id, article_id)?;
        info!("event=article_unlike module=like status=ok article_id={article_id}");
        Ok(())
    }

    pub fn has_liked(&self, article_id: ArticleId, user_id: UserId) -> ServiceResult<bool> {
        Ok(self.repo.has_like(user_id, article_id)?)
    }
}
