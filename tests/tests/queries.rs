use pretty_assertions::assert_eq;
use quarry::{
    stmt::{BinaryOp, Query, Raw, Row, Value},
    Db,
};
use tests::{
    models::{Article, User},
    setup,
};

async fn seed(db: &Db) {
    let people = [
        ("Ann", Some(30), Some("ann@example.com")),
        ("Bo", Some(17), None),
        ("Cy", Some(45), Some("cy@example.org")),
        ("Di", Some(30), None),
        ("Ed", None, None),
    ];

    for (name, age, email) in people {
        let mut user = User::new(name);
        user.age = age;
        user.email = email.map(str::to_string);
        db.save(&mut user).await.unwrap();

        let count = match name {
            "Ann" => 2,
            "Cy" => 1,
            _ => 0,
        };
        for i in 0..count {
            let title = format!("{name} #{i}");
            db.save_related(&user, "articles", &mut Article::new(&title))
                .await
                .unwrap();
        }
    }
}

fn names(rows: Vec<Row>) -> Vec<String> {
    rows.into_iter()
        .map(|mut row| row.take("name").unwrap())
        .collect()
}

#[tokio::test]
async fn empty_in_list_matches_nothing() {
    let (db, log) = setup().await;
    seed(&db).await;
    log.clear();

    let users = db
        .query::<User>()
        .where_in("id", Vec::<i64>::new())
        .get()
        .await
        .unwrap();

    assert!(users.is_empty());
    assert_eq!(log.statements(), ["SELECT * FROM users WHERE 1 = 0"]);
}

#[tokio::test]
async fn and_or_connectors() {
    let (db, _log) = setup().await;
    seed(&db).await;

    let rows = db
        .fetch(
            Query::table("users")
                .where_eq("age", 30)
                .or_where("name", "Bo")
                .order_by("name"),
        )
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ann", "Bo", "Di"]);

    let rows = db
        .fetch(
            Query::table("users")
                .where_eq("age", 30)
                .where_not_null("email"),
        )
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ann"]);
}

#[tokio::test]
async fn between_null_and_like() {
    let (db, _log) = setup().await;
    seed(&db).await;

    let rows = db
        .fetch(
            Query::table("users")
                .where_between("age", 18, 40)
                .order_by("name"),
        )
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ann", "Di"]);

    let rows = db
        .fetch(Query::table("users").where_null("age"))
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ed"]);

    let rows = db
        .fetch(
            Query::table("users")
                .where_like("email", "%@example.com")
                .or_where_not_between("age", 18, 40)
                .order_by("name"),
        )
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ann", "Bo", "Cy"]);
}

#[tokio::test]
async fn ordering_and_limits() {
    let (db, _log) = setup().await;
    seed(&db).await;

    let rows = db
        .fetch(
            Query::table("users")
                .where_not_null("age")
                .order_by_desc("age")
                .order_by("name")
                .skip(1)
                .take(2),
        )
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ann", "Di"]);

    // An offset without a count keeps every remaining row.
    let rows = db
        .fetch(Query::table("users").order_by("name").skip(3))
        .await
        .unwrap();
    assert_eq!(names(rows), ["Di", "Ed"]);
}

#[tokio::test]
async fn sub_selects_and_raw_fragments() {
    let (db, _log) = setup().await;
    seed(&db).await;

    let rows = db
        .fetch(
            Query::table("users")
                .where_in_sub("id", |q| q.from("articles").select(["userId"]))
                .order_by("name"),
        )
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ann", "Cy"]);

    let rows = db
        .fetch(
            Query::table("users")
                .where_sub("age", BinaryOp::Eq, |q| q.from("users").max("age")),
        )
        .await
        .unwrap();
    assert_eq!(names(rows), ["Cy"]);

    let rows = db
        .fetch(
            Query::table("users")
                .where_raw(Raw::with_bindings("length(name) = ?", [Value::I64(3)])),
        )
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ann"]);
}

#[tokio::test]
async fn joins_and_grouped_aggregates() {
    let (db, _log) = setup().await;
    seed(&db).await;

    let rows = db
        .fetch(
            Query::table("users")
                .select(["users.name", "articles.title"])
                .join("articles", "users.id", BinaryOp::Eq, "articles.userId")
                .order_by("articles.id"),
        )
        .await
        .unwrap();

    let titles: Vec<String> = rows
        .into_iter()
        .map(|mut row| row.take("title").unwrap())
        .collect();
    assert_eq!(titles, ["Ann #0", "Ann #1", "Cy #0"]);

    let rows = db
        .fetch(
            Query::table("users")
                .left_join("articles", "users.id", BinaryOp::Eq, "articles.userId")
                .group_by(["users.name"])
                .count_columns(["articles.id"])
                .order_by("users.name"),
        )
        .await
        .unwrap();

    let counts: Vec<(String, i64)> = rows
        .into_iter()
        .map(|mut row| {
            let name = row.take("name").unwrap();
            (name, row.take("aggregate").unwrap())
        })
        .collect();

    assert_eq!(
        counts,
        [
            ("Ann".to_string(), 2),
            ("Bo".to_string(), 0),
            ("Cy".to_string(), 1),
            ("Di".to_string(), 0),
            ("Ed".to_string(), 0),
        ]
    );
}

#[tokio::test]
async fn writes_through_the_builder() {
    let (db, _log) = setup().await;
    seed(&db).await;

    let updated = db
        .exec(
            Query::table("users")
                .where_eq("age", 30)
                .update(Row::new().set("email", "thirty@example.com")),
        )
        .await
        .unwrap();
    assert_eq!(updated, 2);

    let deleted = db
        .exec(Query::table("articles").where_like("title", "Ann%").delete())
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    let remaining = db.query::<Article>().count().await.unwrap();
    assert_eq!(remaining, 1);

    let first = db
        .fetch_first(
            Query::table("users")
                .where_eq("email", "thirty@example.com")
                .order_by("name"),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.get("name"), Some(&Value::from("Ann")));
}

#[tokio::test]
async fn driver_errors_carry_the_statement() {
    let (db, _log) = setup().await;

    let err = db
        .fetch(Query::table("missing").where_eq("id", 1))
        .await
        .unwrap_err();

    assert!(err.is_driver_operation_failed());
    let (sql, bindings) = err.statement().unwrap();
    assert_eq!(sql, "SELECT * FROM missing WHERE id = ?");
    assert_eq!(bindings, &[Value::I64(1)]);
}

#[tokio::test]
async fn ordered_and_limited_writes() {
    let (db, _log) = setup().await;
    seed(&db).await;

    let deleted = db
        .exec(
            Query::table("users")
                .where_eq("age", 30)
                .order_by_desc("name")
                .take(1)
                .delete(),
        )
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let rows = db
        .fetch(Query::table("users").where_eq("age", 30))
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ann"]);

    let updated = db
        .exec(
            Query::table("users")
                .where_null("email")
                .order_by("name")
                .take(1)
                .update(Row::new().set("email", "bo@example.com")),
        )
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let rows = db
        .fetch(Query::table("users").where_null("email").order_by("name"))
        .await
        .unwrap();
    assert_eq!(names(rows), ["Ed"]);
}
