//! Article search.
//!
//! # Responsibility
//! - Translate `ArticleSearch` filters into SQL predicates.
//! - Provide the Unicode-aware case-insensitive substring function used by
//!   those predicates.

pub mod article_filter;
