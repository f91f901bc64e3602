//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Apply the authorship guard on every mutating path.
//! - Map storage outcomes onto the public error taxonomy.

pub mod article_service;
pub mod comment_service;
pub mod error;
pub mod like_service;
pub mod tag_service;
pub mod user_service;
