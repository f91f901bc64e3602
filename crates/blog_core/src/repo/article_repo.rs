//! Article repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist articles together with their tag links.
//! - Load enriched views (author, tags, counts) from one read snapshot.
//!
//! # Invariants
//! - Create and update resolve every tag id inside the write transaction;
//!   one unresolved id aborts the whole write.
//! - A present tag set replaces all existing links, atomically with the
//!   field update.
//! - Deleting an article removes its comments, likes and tag links through
//!   `ON DELETE CASCADE`.
//! - Listing order is `created_at DESC, id ASC`.

use crate::model::article::{
    Article, ArticleCounts, ArticleDetail, ArticleId, ArticlePatch, ArticleView,
};
use crate::model::resource::Resource;
use crate::model::tag::TagId;
use crate::model::user::Author;
use crate::repo::comment_repo::load_comment_views;
use crate::repo::like_repo::load_likes_for_article;
use crate::repo::tag_repo::{first_missing_tag, load_tags_for_article, replace_article_tags};
use crate::repo::{ensure_tables, parse_uuid, user_exists, RepoError, RepoResult};
use crate::search::article_filter::ArticleFilter;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};

const ARTICLE_VIEW_SELECT_SQL: &str = "SELECT
    a.id AS id,
    a.title AS title,
    a.content AS content,
    a.published AS published,
    a.author_id AS author_id,
    a.created_at AS created_at,
    a.updated_at AS updated_at,
    u.username AS author_username,
    (SELECT COUNT(*) FROM comments c WHERE c.article_id = a.id) AS comment_count,
    (SELECT COUNT(*) FROM likes l WHERE l.article_id = a.id) AS like_count
FROM articles a
INNER JOIN users u ON u.id = a.author_id";

/// Repository interface for the article aggregate.
pub trait ArticleRepository {
    /// Inserts `article` and links `tag_ids` in one transaction.
    fn create_article(&self, article: &Article, tag_ids: &[TagId]) -> RepoResult<ArticleId>;
    /// Applies the present fields of `patch` and, when given, replaces the
    /// tag set, in one transaction.
    fn update_article(
        &self,
        id: ArticleId,
        patch: &ArticlePatch,
        tag_ids: Option<&[TagId]>,
        now_ms: i64,
    ) -> RepoResult<()>;
    fn delete_article(&self, id: ArticleId) -> RepoResult<()>;
    fn get_article(&self, id: ArticleId) -> RepoResult<Option<Article>>;
    fn get_article_view(&self, id: ArticleId) -> RepoResult<Option<ArticleView>>;
    fn get_article_detail(&self, id: ArticleId) -> RepoResult<Option<ArticleDetail>>;
    fn list_article_views(&self, filter: &ArticleFilter) -> RepoResult<Vec<ArticleView>>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(
            conn,
            &["articles", "article_tags", "tags", "users", "comments", "likes"],
        )?;
        Ok(Self { conn })
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn create_article(&self, article: &Article, tag_ids: &[TagId]) -> RepoResult<ArticleId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !user_exists(&tx, article.author_id)? {
            return Err(RepoError::NotFound(Resource::User(article.author_id)));
        }
        if let Some(missing) = first_missing_tag(&tx, tag_ids)? {
            return Err(RepoError::NotFound(Resource::Tag(missing)));
        }

        let id_text = article.id.to_string();
        tx.execute(
            "INSERT INTO articles (
                id,
                title,
                content,
                published,
                author_id,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                id_text.as_str(),
                article.title.as_str(),
                article.content.as_str(),
                article.published,
                article.author_id.to_string(),
                article.created_at,
                article.updated_at,
            ],
        )?;
        replace_article_tags(&tx, id_text.as_str(), tag_ids)?;

        tx.commit()?;
        Ok(article.id)
    }

    fn update_article(
        &self,
        id: ArticleId,
        patch: &ArticlePatch,
        tag_ids: Option<&[TagId]>,
        now_ms: i64,
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if let Some(tag_ids) = tag_ids {
            if let Some(missing) = first_missing_tag(&tx, tag_ids)? {
                return Err(RepoError::NotFound(Resource::Tag(missing)));
            }
        }

        let id_text = id.to_string();
        let changed = tx.execute(
            "UPDATE articles
             SET
                title = COALESCE(?2, title),
                content = COALESCE(?3, content),
                published = COALESCE(?4, published),
                updated_at = ?5
             WHERE id = ?1;",
            params![
                id_text.as_str(),
                patch.title.as_deref(),
                patch.content.as_deref(),
                patch.published,
                now_ms,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(Resource::Article(id)));
        }

        if let Some(tag_ids) = tag_ids {
            replace_article_tags(&tx, id_text.as_str(), tag_ids)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_article(&self, id: ArticleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM articles WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(Resource::Article(id)));
        }
        Ok(())
    }

    fn get_article(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, published, author_id, created_at, updated_at
             FROM articles
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_article_row(row)?));
        }
        Ok(None)
    }

    fn get_article_view(&self, id: ArticleId) -> RepoResult<Option<ArticleView>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let view = load_article_view(&tx, id)?;
        tx.commit()?;
        Ok(view)
    }

    fn get_article_detail(&self, id: ArticleId) -> RepoResult<Option<ArticleDetail>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let Some(view) = load_article_view(&tx, id)? else {
            return Ok(None);
        };

        let id_text = id.to_string();
        let comments = load_comment_views(&tx, id_text.as_str())?;
        let likes = load_likes_for_article(&tx, id_text.as_str())?;
        tx.commit()?;

        Ok(Some(ArticleDetail {
            article: view.article,
            author: view.author,
            tags: view.tags,
            comments,
            likes,
            counts: view.counts,
        }))
    }

    fn list_article_views(&self, filter: &ArticleFilter) -> RepoResult<Vec<ArticleView>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let sql = format!(
            "{ARTICLE_VIEW_SELECT_SQL}{} ORDER BY a.created_at DESC, a.id ASC;",
            filter.where_sql()
        );

        let mut views = Vec::new();
        {
            let mut stmt = tx.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(filter.binds().iter()))?;
            while let Some(row) = rows.next()? {
                views.push(parse_article_view_row(&tx, row)?);
            }
        }
        tx.commit()?;
        Ok(views)
    }
}

fn load_article_view(conn: &Connection, id: ArticleId) -> RepoResult<Option<ArticleView>> {
    let mut stmt = conn.prepare(&format!("{ARTICLE_VIEW_SELECT_SQL} WHERE a.id = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_article_view_row(conn, row)?));
    }
    Ok(None)
}

fn parse_article_view_row(conn: &Connection, row: &Row<'_>) -> RepoResult<ArticleView> {
    let article = parse_article_row(row)?;
    let tags = load_tags_for_article(conn, article.id.to_string().as_str())?;
    Ok(ArticleView {
        author: Author {
            id: article.author_id,
            username: row.get("author_username")?,
        },
        tags,
        counts: ArticleCounts {
            comments: row.get("comment_count")?,
            likes: row.get("like_count")?,
        },
        article,
    })
}

fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let id_text: String = row.get("id")?;
    let author_text: String = row.get("author_id")?;
    let published = match row.get::<_, i64>("published")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid published value `{other}` in articles.published"
            )));
        }
    };

    Ok(Article {
        id: parse_uuid(&id_text, "articles.id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        published,
        author_id: parse_uuid(&author_text, "articles.author_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
