//! Like ledger entry.

use crate::model::article::ArticleId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// One user's like on one article. The pair is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user_id: UserId,
    pub article_id: ArticleId,
    pub created_at: i64,
}
