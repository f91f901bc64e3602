use blog_core::db::open_db_in_memory;
use blog_core::{
    ArticlePatch, ArticleService, NewArticle, NewUser, ServiceError, SqliteArticleRepository,
    SqliteLikeRepository, SqliteTagRepository, SqliteUserRepository, TagService, UserService,
};

#[test]
fn list_all_reports_article_counts_in_name_order() {
    let conn = open_db_in_memory().unwrap();
    let tags = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let web = tags.create("Web Development").unwrap();
    let ai = tags.create("AI").unwrap();
    let db = tags.create("database").unwrap();

    let author = UserService::new(SqliteUserRepository::try_new(&conn).unwrap())
        .register(NewUser::new("a@example.com", "alice"))
        .unwrap();
    let articles = ArticleService::new(
        SqliteArticleRepository::try_new(&conn).unwrap(),
        SqliteLikeRepository::try_new(&conn).unwrap(),
    );
    articles
        .create(author.id, NewArticle::new("one", "c").with_tags([web.id, ai.id]))
        .unwrap();
    let second = articles
        .create(author.id, NewArticle::new("two", "c").with_tags([web.id]))
        .unwrap();

    let summaries = tags.list_all().unwrap();
    let listed: Vec<(&str, u64)> = summaries
        .iter()
        .map(|summary| (summary.tag.name.as_str(), summary.article_count))
        .collect();
    assert_eq!(
        listed,
        vec![("AI", 1), ("database", 0), ("Web Development", 2)]
    );
    assert_eq!(summaries[1].tag.id, db.id);

    articles
        .update(
            second.article.id,
            author.id,
            ArticlePatch::default().tag_ids([db.id]),
        )
        .unwrap();
    let counts: Vec<u64> = tags
        .list_all()
        .unwrap()
        .iter()
        .map(|summary| summary.article_count)
        .collect();
    assert_eq!(counts, vec![1, 1, 1]);
}

#[test]
fn create_trims_and_rejects_blank_names() {
    let conn = open_db_in_memory().unwrap();
    let tags = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());

    let tag = tags.create("  Rust  ").unwrap();
    assert_eq!(tag.name, "Rust");
    assert!(matches!(
        tags.create("   "),
        Err(ServiceError::InvalidInput(_))
    ));
    assert_eq!(tags.list_all().unwrap().len(), 1);
}

#[test]
fn summaries_serialize_flat() {
    let conn = open_db_in_memory().unwrap();
    let tags = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let tag = tags.create("Technology").unwrap();

    let summaries = tags.list_all().unwrap();
    let json = serde_json::to_value(&summaries[0]).unwrap();
    assert_eq!(json["id"], tag.id.to_string());
    assert_eq!(json["name"], "Technology");
    assert_eq!(json["article_count"], 0);
}
