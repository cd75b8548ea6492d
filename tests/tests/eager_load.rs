use pretty_assertions::assert_eq;
use quarry::{stmt::Value, Db, Entity};
use tests::{
    models::{Article, Profile, User},
    setup,
};

async fn user_with_articles(db: &Db, name: &str, titles: &[&str]) -> User {
    let mut user = User::new(name);
    db.save(&mut user).await.unwrap();

    for title in titles {
        db.save_related(&user, "articles", &mut Article::new(title))
            .await
            .unwrap();
    }

    user
}

#[tokio::test]
async fn has_many_loads_with_one_query() {
    let (db, log) = setup().await;

    for i in 0..50 {
        let name = format!("user{i}");
        user_with_articles(&db, &name, &["first", "second"]).await;
    }
    log.clear();

    let users = db.query::<User>().with(["articles"]).get().await.unwrap();

    assert_eq!(users.len(), 50);
    assert_eq!(log.len(), 2);

    let statements = log.statements();
    assert_eq!(statements[0], "SELECT * FROM users");
    assert!(statements[1].starts_with("SELECT * FROM articles WHERE userId IN (?, ?"));

    for user in &users {
        let articles = user.articles.get().unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|article| article.user_id == user.id));
        assert!(articles.iter().all(|article| article.exists()));
    }
}

#[tokio::test]
async fn single_owner_uses_equality() {
    let (db, log) = setup().await;

    let mut user = user_with_articles(&db, "Ann", &["a", "b", "c"]).await;
    log.clear();

    db.load(&mut user, "articles").await.unwrap();
    assert_eq!(user.articles.len(), 3);

    let op = log.pop().unwrap();
    assert_eq!(op.sql, "SELECT * FROM articles WHERE userId = ?");
    assert_eq!(op.bindings, vec![Value::I64(user.id.unwrap())]);
}

#[tokio::test]
async fn belongs_to_shares_parents() {
    let (db, log) = setup().await;

    let ann = user_with_articles(&db, "Ann", &["a", "b"]).await;
    let bo = user_with_articles(&db, "Bo", &["c"]).await;
    log.clear();

    let articles = db
        .query::<Article>()
        .order_by("id")
        .with(["author"])
        .get()
        .await
        .unwrap();

    assert_eq!(log.len(), 2);
    let op = log.statements().pop().unwrap();
    assert_eq!(op, "SELECT * FROM users WHERE id IN (?, ?)");

    let authors: Vec<_> = articles
        .iter()
        .map(|article| article.author.get().unwrap().name.as_str())
        .collect();
    assert_eq!(authors, ["Ann", "Ann", "Bo"]);
    assert_eq!(articles[0].author.get().unwrap().id, ann.id);
    assert_eq!(articles[2].author.get().unwrap().id, bo.id);
}

#[tokio::test]
async fn belongs_to_with_null_key_loads_nothing() {
    let (db, log) = setup().await;

    let mut article = Article::new("orphan");
    db.save(&mut article).await.unwrap();
    log.clear();

    db.load(&mut article, "author").await.unwrap();

    assert!(log.is_empty());
    assert!(article.author.get().is_none());
}

#[tokio::test]
async fn has_one_loads_the_profile() {
    let (db, _log) = setup().await;

    let ann = user_with_articles(&db, "Ann", &[]).await;
    let bo = user_with_articles(&db, "Bo", &[]).await;

    let mut profile = Profile {
        bio: Some("hello".to_string()),
        ..Profile::default()
    };
    db.save_related(&ann, "profile", &mut profile).await.unwrap();
    assert_eq!(profile.user_id, ann.id);

    let users = db
        .query::<User>()
        .where_in("id", [ann.id.unwrap(), bo.id.unwrap()])
        .order_by("id")
        .with(["profile"])
        .get()
        .await
        .unwrap();

    let bio = users[0].profile.get().and_then(|p| p.bio.as_deref());
    assert_eq!(bio, Some("hello"));
    assert!(users[1].profile.get().is_none());
}

#[tokio::test]
async fn with_count_attaches_counts() {
    let (db, log) = setup().await;

    user_with_articles(&db, "Ann", &["a", "b", "c"]).await;
    user_with_articles(&db, "Bo", &[]).await;
    log.clear();

    let users = db
        .query::<User>()
        .order_by("name")
        .with_count(["articles"])
        .get()
        .await
        .unwrap();

    assert_eq!(log.len(), 2);
    assert_eq!(
        log.statements()[1],
        "SELECT userId, COUNT(*) AS aggregate FROM articles WHERE userId IN (?, ?) GROUP BY userId"
    );

    assert_eq!(users[0].state.count("articles").unwrap(), 3);
    assert_eq!(users[1].state.count("articles").unwrap(), 0);

    let err = users[0].state.count("profile").unwrap_err();
    assert!(err.is_invalid_statement());
}

#[tokio::test]
async fn lazy_load_is_cached_until_reload() {
    let (db, log) = setup().await;

    let mut user = user_with_articles(&db, "Ann", &["a"]).await;
    log.clear();

    db.load(&mut user, "articles").await.unwrap();
    db.load(&mut user, "articles").await.unwrap();
    assert_eq!(log.selects(), 1);
    assert_eq!(user.articles.len(), 1);

    db.save_related(&user, "articles", &mut Article::new("b"))
        .await
        .unwrap();
    log.clear();

    db.reload(&mut user, "articles").await.unwrap();
    assert_eq!(log.selects(), 1);
    assert_eq!(user.articles.len(), 2);
}

#[tokio::test]
async fn empty_result_issues_no_relation_query() {
    let (db, log) = setup().await;

    let users = db
        .query::<User>()
        .with(["articles", "profile"])
        .with_count(["articles"])
        .get()
        .await
        .unwrap();

    assert!(users.is_empty());
    assert_eq!(log.statements(), ["SELECT * FROM users"]);
}

#[tokio::test]
async fn unknown_relation_is_an_error() {
    let (db, _log) = setup().await;

    let mut user = user_with_articles(&db, "Ann", &[]).await;

    let err = db.load(&mut user, "comments").await.unwrap_err();
    assert!(err.is_unknown_relation());

    let err = db
        .query::<User>()
        .with(["comments"])
        .get()
        .await
        .unwrap_err();
    assert!(err.is_unknown_relation());
}

#[tokio::test]
async fn associate_sets_the_foreign_key() {
    let (db, log) = setup().await;

    let ann = user_with_articles(&db, "Ann", &[]).await;
    log.clear();

    let mut article = Article::new("draft");
    db.associate(&mut article, "author", &ann).unwrap();

    assert_eq!(article.user_id, ann.id);
    assert_eq!(article.author.get().unwrap().name, "Ann");
    assert!(log.is_empty());

    db.save(&mut article).await.unwrap();
    let found: Article = db.find(article.id.unwrap()).await.unwrap();
    assert_eq!(found.user_id, ann.id);
}
