//! Domain model for the article core.
//!
//! # Responsibility
//! - Define the stored shapes (`Article`, `Comment`, `Tag`, `Like`, `User`).
//! - Define enriched read models returned by services.
//! - Define write inputs, including partial-update patches.
//!
//! # Invariants
//! - Every entity except `Like` is identified by a stable UUID.
//! - A `Like` is identified by its `(user_id, article_id)` pair.
//! - Timestamps are Unix epoch milliseconds.

pub mod article;
pub mod comment;
pub mod like;
pub mod resource;
pub mod tag;
pub mod user;
