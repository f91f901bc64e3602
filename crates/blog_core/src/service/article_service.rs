//! Article use-case service.
//!
//! # Responsibility
//! - Provide create/list/search/get/update/delete for articles.
//! - Enforce authorship on update and delete.
//! - Confirm article existence before delegating like/unlike to the ledger.
//!
//! # Invariants
//! - Only the article author may update or delete it.
//! - A present `tag_ids` in a patch replaces the whole tag set.
//! - Listing includes unpublished articles.

use crate::db::now_epoch_ms;
use crate::guard::ensure_owner;
use crate::model::article::{
    Article, ArticleDetail, ArticleId, ArticlePatch, ArticleSearch, ArticleView, NewArticle,
};
use crate::model::like::Like;
use crate::model::resource::Resource;
use crate::model::user::UserId;
use crate::repo::article_repo::ArticleRepository;
use crate::repo::like_repo::LikeRepository;
use crate::search::article_filter::{normalize_query, ArticleFilter};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::like_service::LikeService;
use log::{info, warn};

/// Article engine facade over repository implementations.
pub struct ArticleService<A: ArticleRepository, L: LikeRepository> {
    articles: A,
    likes: LikeService<L>,
}

impl<A: ArticleRepository, L: LikeRepository> ArticleService<A, L> {
    pub fn new(articles: A, likes: L) -> Self {
        Self {
            articles,
            likes: LikeService::new(likes),
        }
    }

    /// Creates one article for `author_id`.
    ///
    /// # Errors
    /// - `NotFound` when the author or any requested tag does not exist.
    pub fn create(&self, author_id: UserId, input: NewArticle) -> ServiceResult<ArticleView> {
        let article = Article::new(author_id, &input, now_epoch_ms());
        let tag_ids = input.tag_set();
        self.articles
            .create_article(&article, &tag_ids)
            .map_err(ServiceError::from)
            .inspect_err(|err| {
                warn!(
                    "event=article_create module=article status=error error_code={}",
                    err.code()
                );
            })?;

        info!(
            "event=article_create module=article status=ok article_id={} tag_count={} published={}",
            article.id,
            tag_ids.len(),
            article.published
        );
        self.articles
            .get_article_view(article.id)?
            .ok_or(ServiceError::InconsistentState(
                "created article not found in read-back",
            ))
    }

    /// Lists every article, published or not, newest first.
    pub fn list_all(&self) -> ServiceResult<Vec<ArticleView>> {
        Ok(self.articles.list_article_views(&ArticleFilter::all())?)
    }

    /// Lists articles matching the optional text and tag filters.
    pub fn search(&self, search: &ArticleSearch) -> ServiceResult<Vec<ArticleView>> {
        let filter = ArticleFilter::from_search(search);
        let views = self.articles.list_article_views(&filter)?;
        info!(
            "event=article_search module=article status=ok filtered={} has_query={} tag_filter_count={} hits={}",
            !filter.is_empty(),
            normalize_query(search.query.as_deref()).is_some(),
            search.tag_ids.len(),
            views.len()
        );
        Ok(views)
    }

    /// Gets one article with tags, comments, likes and counts.
    pub fn get_by_id(&self, id: ArticleId) -> ServiceResult<ArticleDetail> {
        self.articles
            .get_article_detail(id)?
            .ok_or(ServiceError::NotFound(Resource::Article(id)))
    }

    /// Applies a partial update on behalf of `requester_id`.
    ///
    /// # Errors
    /// - `NotFound` when the article or a replacement tag does not exist.
    /// - `Forbidden` when `requester_id` is not the author.
    pub fn update(
        &self,
        id: ArticleId,
        requester_id: UserId,
        patch: ArticlePatch,
    ) -> ServiceResult<ArticleView> {
        self.load_owned(id, requester_id, "article_update")?;

        let tag_ids = patch.tag_set();
        self.articles
            .update_article(id, &patch, tag_ids.as_deref(), now_epoch_ms())?;
        info!(
            "event=article_update module=article status=ok article_id={id} fields_present={} tags_replaced={}",
            !patch.is_empty(),
            tag_ids.is_some()
        );

        self.articles
            .get_article_view(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated article not found in read-back",
            ))
    }

    /// Deletes an article with its comments and likes, returning the removed
    /// row.
    pub fn delete(&self, id: ArticleId, requester_id: UserId) -> ServiceResult<Article> {
        let article = self.load_owned(id, requester_id, "article_delete")?;
        self.articles.delete_article(id)?;
        info!("event=article_delete module=article status=ok article_id={id}");
        Ok(article)
    }

    /// Likes an existing article.
    pub fn like(&self, article_id: ArticleId, user_id: UserId) -> ServiceResult<Like> {
        self.require_article(article_id)?;
        self.likes.like(article_id, user_id)
    }

    /// Removes a like from an existing article.
    pub fn unlike(&self, article_id: ArticleId, user_id: UserId) -> ServiceResult<()> {
        self.require_article(article_id)?;
        self.likes.unlike(article_id, user_id)
    }

    fn require_article(&self, id: ArticleId) -> ServiceResult<Article> {
        self.articles
            .get_article(id)?
            .ok_or(ServiceError::NotFound(Resource::Article(id)))
    }

    fn load_owned(
        &self,
        id: ArticleId,
        requester_id: UserId,
        event: &'static str,
    ) -> ServiceResult<Article> {
        let article = self.require_article(id)?;
        if let Err(denied) = ensure_owner(&article, requester_id) {
            warn!("event={event} module=article status=denied article_id={id}");
            return Err(denied.into());
        }
        Ok(article)
    }
}
