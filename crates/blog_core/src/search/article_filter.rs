//! Free-text and tag filtering for article listings.
//!
//! # Responsibility
//! - Build the `WHERE` clause and bind values for an `ArticleSearch`.
//! - Register `blog_contains_ci`, a case-insensitive literal substring test.
//!
//! # Invariants
//! - Text matching is literal substring, never tokenized or ranked.
//! - Text filter: title OR content contains the query, ignoring case.
//! - Tag filter: the article carries at least one of the listed tags.
//! - Text and tag filters combine with AND; absent filters match everything.

use crate::model::article::ArticleSearch;
use crate::model::tag::TagId;
use regex::{Regex, RegexBuilder};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::sync::Arc;

/// SQL name of the case-insensitive substring function.
pub const CONTAINS_CI_FN: &str = "blog_contains_ci";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Registers search SQL functions on one connection.
///
/// `blog_contains_ci(needle, haystack)` compiles `needle` once per statement
/// (cached as auxiliary data) and reports whether `haystack` contains it.
pub fn register_search_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        CONTAINS_CI_FN,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let matcher: Arc<Regex> =
                ctx.get_or_create_aux(0, |needle| -> Result<Regex, BoxError> {
                    Ok(literal_matcher(needle.as_str()?)?)
                })?;
            let haystack = ctx
                .get_raw(1)
                .as_str()
                .map_err(|err| rusqlite::Error::UserFunctionError(err.into()))?;
            Ok(matcher.is_match(haystack))
        },
    )
}

/// Builds a case-insensitive matcher for `needle` taken literally.
pub fn literal_matcher(needle: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
}

/// Returns the text query to apply, or `None` when it is absent or empty.
///
/// Whitespace is part of the substring and is never trimmed.
pub fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.filter(|value| !value.is_empty())
}

/// SQL predicate compiled from an `ArticleSearch`.
///
/// Expects the article table to be aliased as `a`.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    clauses: Vec<String>,
    binds: Vec<Value>,
}

impl ArticleFilter {
    /// A filter matching every article.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_search(search: &ArticleSearch) -> Self {
        let mut filter = Self::default();

        if let Some(query) = normalize_query(search.query.as_deref()) {
            filter.clauses.push(format!(
                "({CONTAINS_CI_FN}(?, a.title) OR {CONTAINS_CI_FN}(?, a.content))"
            ));
            filter.binds.push(Value::Text(query.to_string()));
            filter.binds.push(Value::Text(query.to_string()));
        }

        let tag_ids: BTreeSet<TagId> = search.tag_ids.iter().copied().collect();
        if !tag_ids.is_empty() {
            let placeholders = vec!["?"; tag_ids.len()].join(", ");
            filter.clauses.push(format!(
                "EXISTS (
                    SELECT 1
                    FROM article_tags at
                    WHERE at.article_id = a.id
                      AND at.tag_id IN ({placeholders})
                )"
            ));
            filter
                .binds
                .extend(tag_ids.iter().map(|id| Value::Text(id.to_string())));
        }

        filter
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Renders ` WHERE ...` (leading space) or an empty string.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        format!(" WHERE {}", self.clauses.join(" AND "))
    }

    pub fn binds(&self) -> &[Value] {
        &self.binds
    }
}
