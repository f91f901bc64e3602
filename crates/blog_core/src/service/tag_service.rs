//! Tag registry use-case service.
//!
//! Tags are seeded outside the article flow; articles only reference them.

use crate::model::tag::{Tag, TagSummary};
use crate::repo::tag_repo::TagRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;
use uuid::Uuid;

/// Tag registry facade over repository implementations.
pub struct TagService<R: TagRepository> {
    repo: R,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every tag with the number of articles carrying it.
    pub fn list_all(&self) -> ServiceResult<Vec<TagSummary>> {
        Ok(self.repo.list_tag_summaries()?)
    }

    /// Seeds one tag. The name is trimmed and must not be blank.
    pub fn create(&self, name: &str) -> ServiceResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidInput(
                "tag name must not be blank".to_string(),
            ));
        }

        let tag = Tag {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.repo.create_tag(&tag)?;
        info!("event=tag_create module=tag status=ok tag_id={}", tag.id);
        Ok(tag)
    }
}
