//! Comment use-case service.
//!
//! # Responsibility
//! - Create, list, edit and delete comments scoped to one article.
//!
//! # Invariants
//! - Edit/delete rights belong to the comment author only; the parent
//!   article's author has no special rights.
//! - Listing an article without comments (or a deleted article) yields an
//!   empty list, not an error.

use crate::db::now_epoch_ms;
use crate::guard::ensure_owner;
use crate::model::article::ArticleId;
use crate::model::comment::{Comment, CommentId, CommentView};
use crate::model::resource::Resource;
use crate::model::user::UserId;
use crate::repo::comment_repo::CommentRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Comment store facade over repository implementations.
pub struct CommentService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> CommentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a comment by `author_id` to an existing article.
    pub fn create(
        &self,
        article_id: ArticleId,
        author_id: UserId,
        content: impl Into<String>,
    ) -> ServiceResult<CommentView> {
        let comment = Comment::new(article_id, author_id, content, now_epoch_ms());
        self.repo.create_comment(&comment)?;
        info!(
            "event=comment_create module=comment status=ok article_id={article_id} comment_id={}",
            comment.id
        );

        self.repo
            .get_comment_view(comment.id)?
            .ok_or(ServiceError::InconsistentState(
                "created comment not found in read-back",
            ))
    }

    /// Lists comments of one article, newest first.
    pub fn list_by_article(&self, article_id: ArticleId) -> ServiceResult<Vec<CommentView>> {
        Ok(self.repo.list_comment_views(article_id)?)
    }

    /// Replaces the content of a comment owned by `requester_id`.
    pub fn update(
        &self,
        comment_id: CommentId,
        requester_id: UserId,
        content: impl Into<String>,
    ) -> ServiceResult<CommentView> {
        self.load_owned(comment_id, requester_id, "comment_update")?;

        let content = content.into();
        self.repo
            .update_comment_content(comment_id, content.as_str(), now_epoch_ms())?;
        info!("event=comment_update module=comment status=ok comment_id={comment_id}");

        self.repo
            .get_comment_view(comment_id)?
            .ok_or(ServiceError::InconsistentState(
                "updated comment not found in read-back",
            ))
    }

    /// Deletes a comment owned by `requester_id`, returning the removed row.
    pub fn delete(&self, comment_id: CommentId, requester_id: UserId) -> ServiceResult<Comment> {
        let comment = self.load_owned(comment_id, requester_id, "comment_delete")?;
        self.repo.delete_comment(comment_id)?;
        info!("event=comment_delete module=comment status=ok comment_id={comment_id}");
        Ok(comment)
    }

    fn load_owned(
        &self,
        comment_id: CommentId,
        requester_id: UserId,
        event: &'static str,
    ) -> ServiceResult<Comment> {
        let comment = self
            .repo
            .get_comment(comment_id)?
            .ok_or(ServiceError::NotFound(Resource::Comment(comment_id)))?;
        if let Err(denied) = ensure_owner(&comment, requester_id) {
            warn!("event={event} module=comment status=denied comment_id={comment_id}");
            return Err(denied.into());
        }
        Ok(comment)
    }
}
