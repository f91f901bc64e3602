//! Core domain logic for the blog backend.
//! This crate is the single source of truth for article, comment, like and
//! tag invariants.

pub mod config;
pub mod db;
pub mod guard;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use guard::{ensure_owner, is_owner, Owned, OwnershipDenied};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::{
    Article, ArticleCounts, ArticleDetail, ArticleId, ArticlePatch, ArticleSearch, ArticleView,
    NewArticle,
};
pub use model::comment::{Comment, CommentId, CommentView};
pub use model::like::Like;
pub use model::resource::Resource;
pub use model::tag::{Tag, TagId, TagSummary};
pub use model::user::{Author, NewUser, User, UserId};
pub use repo::article_repo::{ArticleRepository, SqliteArticleRepository};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::like_repo::{LikeRepository, SqliteLikeRepository};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::article_service::ArticleService;
pub use service::comment_service::CommentService;
pub use service::error::{ServiceError, ServiceResult};
pub use service::like_service::LikeService;
pub use service::tag_service::TagService;
pub use service::user_service::UserService;

/// Minimal health-check API for embedding hosts.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
