use blog_core::db::open_db_in_memory;
use blog_core::{
    ArticlePatch, ArticleService, NewArticle, NewUser, Resource, ServiceError,
    SqliteArticleRepository, SqliteLikeRepository, SqliteTagRepository, SqliteUserRepository,
    TagService, User, UserService,
};
use rusqlite::Connection;
use uuid::Uuid;

fn article_service(
    conn: &Connection,
) -> ArticleService<SqliteArticleRepository<'_>, SqliteLikeRepository<'_>> {
    ArticleService::new(
        SqliteArticleRepository::try_new(conn).unwrap(),
        SqliteLikeRepository::try_new(conn).unwrap(),
    )
}

fn register(conn: &Connection, username: &str) -> User {
    UserService::new(SqliteUserRepository::try_new(conn).unwrap())
        .register(NewUser::new(format!("{username}@example.com"), username))
        .unwrap()
}

#[test]
fn create_then_get_returns_input_with_resolved_tags() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "johndoe");
    let tags = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let rust = tags.create("Programming").unwrap();
    let web = tags.create("Web Development").unwrap();
    let service = article_service(&conn);

    let created = service
        .create(
            author.id,
            NewArticle::new("First post", "Hello world")
                .published(true)
                .with_tags([rust.id, web.id]),
        )
        .unwrap();
    assert_eq!(created.author.id, author.id);
    assert_eq!(created.author.username, "johndoe");
    assert_eq!(created.counts.comments, 0);
    assert_eq!(created.counts.likes, 0);

    let loaded = service.get_by_id(created.article.id).unwrap();
    assert_eq!(loaded.article.title, "First post");
    assert_eq!(loaded.article.content, "Hello world");
    assert!(loaded.article.published);
    assert_eq!(loaded.article.author_id, author.id);
    let mut tag_ids: Vec<Uuid> = loaded.tags.iter().map(|tag| tag.id).collect();
    tag_ids.sort();
    let mut expected = vec![rust.id, web.id];
    expected.sort();
    assert_eq!(tag_ids, expected);
    assert!(loaded.comments.is_empty());
    assert!(loaded.likes.is_empty());
}

#[test]
fn create_defaults_to_unpublished_and_untagged() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "janesmith");
    let service = article_service(&conn);

    let created = service
        .create(author.id, NewArticle::new("Draft", "wip"))
        .unwrap();
    assert!(!created.article.published);
    assert!(created.tags.is_empty());
    assert_eq!(created.article.created_at, created.article.updated_at);
}

#[test]
fn create_rejects_unknown_tag_without_persisting_anything() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "bobwilson");
    let known = TagService::new(SqliteTagRepository::try_new(&conn).unwrap())
        .create("AI")
        .unwrap();
    let service = article_service(&conn);
    let dangling = Uuid::new_v4();

    let err = service
        .create(
            author.id,
            NewArticle::new("t", "c").with_tags([known.id, dangling]),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Resource::Tag(id)) if id == dangling));
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn create_rejects_unknown_author() {
    let conn = open_db_in_memory().unwrap();
    let service = article_service(&conn);
    let ghost = Uuid::new_v4();

    let err = service
        .create(ghost, NewArticle::new("t", "c"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Resource::User(id)) if id == ghost));
}

#[test]
fn get_by_id_unknown_article_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = article_service(&conn);
    let missing = Uuid::new_v4();

    let err = service.get_by_id(missing).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Resource::Article(id)) if id == missing));
}

#[test]
fn list_all_includes_unpublished_articles_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "alice");
    let service = article_service(&conn);

    let older = service
        .create(author.id, NewArticle::new("older", "a").published(true))
        .unwrap();
    let newer = service
        .create(author.id, NewArticle::new("newer", "b"))
        .unwrap();
    conn.execute(
        "UPDATE articles SET created_at = 1000 WHERE id = ?1;",
        [older.article.id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE articles SET created_at = 2000 WHERE id = ?1;",
        [newer.article.id.to_string()],
    )
    .unwrap();

    let listed = service.list_all().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].article.id, newer.article.id);
    assert!(!listed[0].article.published);
    assert_eq!(listed[1].article.id, older.article.id);
}

#[test]
fn update_title_only_leaves_other_fields_untouched() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "alice");
    let tag = TagService::new(SqliteTagRepository::try_new(&conn).unwrap())
        .create("Database")
        .unwrap();
    let service = article_service(&conn);
    let created = service
        .create(
            author.id,
            NewArticle::new("before", "body")
                .published(true)
                .with_tags([tag.id]),
        )
        .unwrap();

    let updated = service
        .update(
            created.article.id,
            author.id,
            ArticlePatch::default().title("after"),
        )
        .unwrap();
    assert_eq!(updated.article.title, "after");
    assert_eq!(updated.article.content, "body");
    assert!(updated.article.published);
    assert_eq!(updated.tags, created.tags);
    assert_eq!(updated.article.created_at, created.article.created_at);
    assert!(updated.article.updated_at >= created.article.updated_at);
}

#[test]
fn update_tag_ids_replaces_the_whole_set_and_empty_clears_it() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "alice");
    let tags = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let first = tags.create("Technology").unwrap();
    let second = tags.create("Programming").unwrap();
    let third = tags.create("AI").unwrap();
    let service = article_service(&conn);
    let created = service
        .create(
            author.id,
            NewArticle::new("t", "c").with_tags([first.id, second.id]),
        )
        .unwrap();

    let replaced = service
        .update(
            created.article.id,
            author.id,
            ArticlePatch::default().tag_ids([third.id]),
        )
        .unwrap();
    assert_eq!(replaced.tags.len(), 1);
    assert_eq!(replaced.tags[0].id, third.id);

    let cleared = service
        .update(
            created.article.id,
            author.id,
            ArticlePatch::default().tag_ids(Vec::<Uuid>::new()),
        )
        .unwrap();
    assert!(cleared.tags.is_empty());
}

#[test]
fn update_with_unknown_tag_applies_nothing() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "alice");
    let tag = TagService::new(SqliteTagRepository::try_new(&conn).unwrap())
        .create("Technology")
        .unwrap();
    let service = article_service(&conn);
    let created = service
        .create(author.id, NewArticle::new("keep", "c").with_tags([tag.id]))
        .unwrap();

    let err = service
        .update(
            created.article.id,
            author.id,
            ArticlePatch::default()
                .title("lost")
                .tag_ids([Uuid::new_v4()]),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Resource::Tag(_))));

    let loaded = service.get_by_id(created.article.id).unwrap();
    assert_eq!(loaded.article.title, "keep");
    assert_eq!(loaded.tags.len(), 1);
    assert_eq!(loaded.tags[0].id, tag.id);
}

#[test]
fn update_and_delete_by_non_owner_are_forbidden() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "alice");
    let stranger = register(&conn, "mallory");
    let service = article_service(&conn);
    let created = service
        .create(author.id, NewArticle::new("mine", "c"))
        .unwrap();

    for requester in [stranger.id, Uuid::new_v4()] {
        let update_err = service
            .update(
                created.article.id,
                requester,
                ArticlePatch::default().title("hijack"),
            )
            .unwrap_err();
        assert!(matches!(
            update_err,
            ServiceError::Forbidden { requester: denied, .. } if denied == requester
        ));

        let delete_err = service.delete(created.article.id, requester).unwrap_err();
        assert!(matches!(delete_err, ServiceError::Forbidden { .. }));
    }

    assert_eq!(
        service.get_by_id(created.article.id).unwrap().article.title,
        "mine"
    );
}

#[test]
fn update_and_delete_unknown_article_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "alice");
    let service = article_service(&conn);
    let missing = Uuid::new_v4();

    let update_err = service
        .update(missing, author.id, ArticlePatch::default().title("x"))
        .unwrap_err();
    assert!(matches!(update_err, ServiceError::NotFound(Resource::Article(_))));

    let delete_err = service.delete(missing, author.id).unwrap_err();
    assert!(matches!(delete_err, ServiceError::NotFound(Resource::Article(_))));
}

#[test]
fn delete_by_owner_removes_article_and_tag_links() {
    let conn = open_db_in_memory().unwrap();
    let author = register(&conn, "alice");
    let tags = TagService::new(SqliteTagRepository::try_new(&conn).unwrap());
    let tag = tags.create("Technology").unwrap();
    let service = article_service(&conn);
    let created = service
        .create(author.id, NewArticle::new("bye", "c").with_tags([tag.id]))
        .unwrap();

    let removed = service.delete(created.article.id, author.id).unwrap();
    assert_eq!(removed.id, created.article.id);
    assert!(matches!(
        service.get_by_id(created.article.id),
        Err(ServiceError::NotFound(_))
    ));

    let summaries = tags.list_all().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].article_count, 0);
}
