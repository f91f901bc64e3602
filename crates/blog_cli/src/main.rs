//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `blog_core` linkage and storage.
//! - Keep output deterministic for quick local sanity checks.

use blog_core::db::migrations::{current_version, latest_version};
use blog_core::{
    ArticleService, CoreConfig, SqliteArticleRepository, SqliteLikeRepository,
    SqliteTagRepository, TagService,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("blog_core ping={}", blog_core::ping());
    println!("blog_core version={}", blog_core::core_version());

    match probe_storage(&CoreConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("blog_core storage=error reason={err}");
            ExitCode::FAILURE
        }
    }
}

fn probe_storage(config: &CoreConfig) -> Result<(), Box<dyn Error>> {
    let conn = config.open()?;
    let schema = current_version(&conn)?;
    println!("blog_core schema={schema}/{}", latest_version());

    let articles = ArticleService::new(
        SqliteArticleRepository::try_new(&conn)?,
        SqliteLikeRepository::try_new(&conn)?,
    )
    .list_all()?;
    let tags = TagService::new(SqliteTagRepository::try_new(&conn)?).list_all()?;
    println!(
        "blog_core articles={} tags={}",
        articles.len(),
        tags.len()
    );

    info!(
        "event=cli_probe module=cli status=ok schema={schema} articles={} tags={}",
        articles.len(),
        tags.len()
    );
    Ok(())
}
