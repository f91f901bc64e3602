//! Tag registry model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TagId = Uuid;

/// Named label attachable to many articles.
///
/// Names are not unique at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Tag listing entry with its association count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    #[serde(flatten)]
    pub tag: Tag,
    pub article_count: u64,
}
