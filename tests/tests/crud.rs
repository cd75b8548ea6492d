use pretty_assertions::assert_eq;
use quarry::{stmt::Row, stmt::Value, Entity};
use tests::{models::User, setup};

#[tokio::test]
async fn save_find_update_delete() {
    let (db, log) = setup().await;

    let mut user = User::new("Ann");
    user.age = Some(30);
    db.save(&mut user).await.unwrap();

    assert!(user.exists());
    let id = user.id.expect("generated key");

    let op = log.pop().unwrap();
    assert!(op.sql.starts_with("INSERT INTO users (name, age, email, createdAt, updatedAt)"));
    assert_eq!(op.bindings[0], Value::from("Ann"));

    let found: User = db.find(id).await.unwrap();
    assert_eq!(found.name, "Ann");
    assert_eq!(found.age, Some(30));
    assert_eq!(found.email, None);
    assert!(found.exists());

    let op = log.pop().unwrap();
    assert_eq!(op.sql, "SELECT * FROM users WHERE id = ? LIMIT 1");
    assert_eq!(op.bindings, vec![Value::I64(id)]);

    user.name = "Annie".to_string();
    db.save(&mut user).await.unwrap();

    let op = log.pop().unwrap();
    assert!(op.sql.starts_with("UPDATE users SET "));
    assert!(op.sql.ends_with(" WHERE id = ?"));

    let found: User = db.find(id).await.unwrap();
    assert_eq!(found.name, "Annie");

    db.delete(&mut user).await.unwrap();
    assert!(!user.exists());

    let err = db.find::<User>(id).await.unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn not_found_carries_the_statement() {
    let (db, _log) = setup().await;

    let err = db.find::<User>(42).await.unwrap_err();
    assert!(err.is_record_not_found());

    let (sql, bindings) = err.statement().unwrap();
    assert_eq!(sql, "SELECT * FROM users WHERE id = ? LIMIT 1");
    assert_eq!(bindings, &[Value::I64(42)]);
}

#[tokio::test]
async fn create_from_row() {
    let (db, _log) = setup().await;

    let user: User = db
        .create(Row::new().set("name", "Bo").set("email", "bo@example.com"))
        .await
        .unwrap();

    assert!(user.exists());
    assert!(user.id.is_some());
    assert_eq!(user.email.as_deref(), Some("bo@example.com"));
}

#[tokio::test]
async fn timestamps_are_stamped() {
    let (db, _log) = setup().await;

    let mut user = User::new("Cy");
    db.save(&mut user).await.unwrap();

    let created_at = user.created_at.unwrap();
    assert_eq!(user.updated_at, Some(created_at));

    let found: User = db.find(user.id.unwrap()).await.unwrap();
    assert_eq!(found.created_at, Some(created_at));

    user.age = Some(5);
    db.save(&mut user).await.unwrap();

    assert_eq!(user.created_at, Some(created_at));
    assert!(user.updated_at.unwrap() >= created_at);
}

#[tokio::test]
async fn refresh_rereads_columns() {
    let (db, _log) = setup().await;

    let mut user = User::new("Di");
    db.save(&mut user).await.unwrap();

    let mut other: User = db.find(user.id.unwrap()).await.unwrap();
    other.age = Some(41);
    db.save(&mut other).await.unwrap();

    assert_eq!(user.age, None);
    db.refresh(&mut user).await.unwrap();
    assert_eq!(user.age, Some(41));
}

#[tokio::test]
async fn first_count_max_and_paginate() {
    let (db, log) = setup().await;

    for (name, age) in [("a", 20), ("b", 35), ("c", 27), ("d", 35), ("e", 18)] {
        let mut user = User::new(name);
        user.age = Some(age);
        db.save(&mut user).await.unwrap();
    }
    log.clear();

    let oldest = db
        .query::<User>()
        .order_by_desc("age")
        .order_by("name")
        .first()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(oldest.name, "b");

    let none = db.query::<User>().where_eq("name", "zed").first().await.unwrap();
    assert!(none.is_none());

    let err = db
        .query::<User>()
        .where_eq("name", "zed")
        .first_or_fail()
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(
        err.statement().unwrap().0,
        "SELECT * FROM users WHERE name = ? LIMIT 1"
    );

    let count = db
        .query::<User>()
        .where_op("age", quarry::stmt::BinaryOp::Ge, 21)
        .take(1)
        .count()
        .await
        .unwrap();
    assert_eq!(count, 3);

    let max = db.query::<User>().max("age").await.unwrap();
    assert_eq!(max, Value::I64(35));

    let max = db.query::<User>().where_eq("name", "zed").max("age").await.unwrap();
    assert_eq!(max, Value::Null);

    log.clear();
    let page = db
        .query::<User>()
        .order_by("name")
        .paginate(2, 2)
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.last_page(), 3);
    assert!(page.has_next());
    assert!(page.has_prev());

    let names: Vec<_> = page.items.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, ["c", "d"]);

    assert_eq!(
        log.statements(),
        [
            "SELECT COUNT(*) AS aggregate FROM users",
            "SELECT * FROM users ORDER BY name ASC LIMIT 2, 2",
        ]
    );

    let err = db.query::<User>().paginate(0, 10).await.unwrap_err();
    assert!(err.is_invalid_statement());
}

#[tokio::test]
async fn truncate_empties_the_table() {
    let (db, _log) = setup().await;

    for name in ["a", "b"] {
        db.save(&mut User::new(name)).await.unwrap();
    }
    assert_eq!(db.query::<User>().count().await.unwrap(), 2);

    db.truncate::<User>().await.unwrap();
    assert_eq!(db.query::<User>().count().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_attribute_is_rejected() {
    let mut user = User::new("Ed");
    let err = user.set_attribute("nickname", Value::from("e")).unwrap_err();
    assert_eq!(err.to_string(), "`User` has no column `nickname`");
}
