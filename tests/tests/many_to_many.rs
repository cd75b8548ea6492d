use pretty_assertions::assert_eq;
use quarry::{
    stmt::{Key, Value},
    Db, PivotChanges,
};
use tests::{
    models::{Article, Tag},
    setup,
};

async fn article(db: &Db, title: &str) -> Article {
    let mut article = Article::new(title);
    db.save(&mut article).await.unwrap();
    article
}

async fn tags(db: &Db, names: &[&str]) -> Vec<i64> {
    let mut ids = vec![];
    for name in names {
        let mut tag = Tag::new(name);
        db.save(&mut tag).await.unwrap();
        ids.push(tag.id.unwrap());
    }
    ids
}

fn keys(ids: &[i64]) -> Vec<Key> {
    ids.iter().copied().map(Key::Int).collect()
}

#[tokio::test]
async fn add_toggle_and_sync() {
    let (db, _log) = setup().await;

    let post = article(&db, "post").await;
    let ids = tags(&db, &["t1", "t2", "t3", "t4"]).await;
    let (t2, t3, t4) = (ids[1], ids[2], ids[3]);

    let pivot = db.pivot(&post, "tags").unwrap();
    assert_eq!(pivot.table().table, "articles_tags");
    assert_eq!(pivot.table().parent_key, "articleId");
    assert_eq!(pivot.table().related_key, "tagId");

    let added = pivot.add([t2, t3]).await.unwrap();
    assert_eq!(added, keys(&[t2, t3]));

    // Already attached keys are skipped.
    let added = pivot.add([t3]).await.unwrap();
    assert!(added.is_empty());

    let changes = pivot.toggle([t2, t4]).await.unwrap();
    assert_eq!(
        changes,
        PivotChanges {
            attached: keys(&[t4]),
            detached: keys(&[t2]),
        }
    );
    assert_eq!(pivot.keys().await.unwrap(), keys(&[t3, t4]));

    pivot.add([t2]).await.unwrap();
    let changes = pivot.sync([t3]).await.unwrap();
    assert!(changes.attached.is_empty());
    assert_eq!(changes.detached, keys(&[t2, t4]));
    assert_eq!(pivot.keys().await.unwrap(), keys(&[t3]));
}

#[tokio::test]
async fn remove_and_clear() {
    let (db, _log) = setup().await;

    let post = article(&db, "post").await;
    let ids = tags(&db, &["a", "b", "c"]).await;

    let pivot = db.pivot(&post, "tags").unwrap();
    pivot.add(ids.clone()).await.unwrap();

    assert_eq!(pivot.remove([ids[0]]).await.unwrap(), 1);
    assert_eq!(pivot.remove([ids[0]]).await.unwrap(), 0);
    assert_eq!(pivot.keys().await.unwrap(), keys(&ids[1..]));

    assert_eq!(pivot.clear().await.unwrap(), 2);
    assert!(pivot.keys().await.unwrap().is_empty());

    // Tags themselves are untouched.
    assert_eq!(db.query::<Tag>().count().await.unwrap(), 3);
}

#[tokio::test]
async fn pivots_are_scoped_to_the_owner() {
    let (db, _log) = setup().await;

    let first = article(&db, "first").await;
    let second = article(&db, "second").await;
    let ids = tags(&db, &["a", "b"]).await;

    db.pivot(&first, "tags").unwrap().add(ids.clone()).await.unwrap();
    db.pivot(&second, "tags").unwrap().add([ids[1]]).await.unwrap();

    db.pivot(&first, "tags").unwrap().clear().await.unwrap();

    let remaining = db.pivot(&second, "tags").unwrap().keys().await.unwrap();
    assert_eq!(remaining, keys(&[ids[1]]));
}

#[tokio::test]
async fn eager_loads_through_the_pivot() {
    let (db, log) = setup().await;

    let first = article(&db, "first").await;
    let second = article(&db, "second").await;
    let ids = tags(&db, &["rust", "sql", "orm"]).await;

    db.pivot(&first, "tags").unwrap().add([ids[0], ids[1]]).await.unwrap();
    db.pivot(&second, "tags").unwrap().add([ids[1], ids[2]]).await.unwrap();
    log.clear();

    let articles = db
        .query::<Article>()
        .order_by("id")
        .with(["tags"])
        .with_count(["tags"])
        .get()
        .await
        .unwrap();

    assert_eq!(log.len(), 3);
    assert_eq!(
        log.statements()[1],
        "SELECT tags.*, articles_tags.articleId AS __pivot_articleId, \
         articles_tags.tagId AS __pivot_tagId FROM tags \
         INNER JOIN articles_tags ON tags.id = articles_tags.tagId \
         WHERE articles_tags.articleId IN (?, ?)"
    );
    assert_eq!(
        log.statements()[2],
        "SELECT articleId, COUNT(*) AS aggregate FROM articles_tags \
         WHERE articleId IN (?, ?) GROUP BY articleId"
    );

    let mut names: Vec<_> = articles[0].tags.iter().map(|t| t.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["rust", "sql"]);

    let mut names: Vec<_> = articles[1].tags.iter().map(|t| t.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["orm", "sql"]);

    for (tag, pivot) in articles[1].tags.iter_with_pivot() {
        assert_eq!(pivot.get("articleId"), Some(&Value::I64(second.id.unwrap())));
        assert_eq!(pivot.get("tagId"), Some(&Value::I64(tag.id.unwrap())));
    }

    assert_eq!(articles[0].state.count("tags").unwrap(), 2);
    assert_eq!(articles[1].state.count("tags").unwrap(), 2);
}

#[tokio::test]
async fn inverse_side_reads_the_same_pivot() {
    let (db, _log) = setup().await;

    let first = article(&db, "first").await;
    let second = article(&db, "second").await;
    let ids = tags(&db, &["shared"]).await;

    db.pivot(&first, "tags").unwrap().add(ids.clone()).await.unwrap();
    db.pivot(&second, "tags").unwrap().add(ids.clone()).await.unwrap();

    let mut tag: Tag = db.find(ids[0]).await.unwrap();
    db.load(&mut tag, "articles").await.unwrap();

    let mut titles: Vec<_> = tag.articles.iter().map(|a| a.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, ["first", "second"]);
}

#[tokio::test]
async fn save_related_attaches_new_entities() {
    let (db, _log) = setup().await;

    let post = article(&db, "post").await;

    let mut tag = Tag::new("fresh");
    db.save_related(&post, "tags", &mut tag).await.unwrap();

    assert!(tag.id.is_some());
    let attached = db.pivot(&post, "tags").unwrap().keys().await.unwrap();
    assert_eq!(attached, keys(&[tag.id.unwrap()]));
}

#[tokio::test]
async fn unsaved_owner_is_rejected() {
    let (db, _log) = setup().await;

    let draft = Article::new("draft");
    let err = db.pivot(&draft, "tags").unwrap_err();
    assert!(err.is_invalid_statement());

    let post = article(&db, "post").await;
    let err = db.pivot(&post, "author").unwrap_err();
    assert!(err.is_invalid_statement());

    let err = db
        .pivot(&post, "tags")
        .unwrap()
        .add([Value::Null])
        .await
        .unwrap_err();
    assert!(err.is_invalid_statement());
}
