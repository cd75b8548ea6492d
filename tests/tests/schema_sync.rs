use pretty_assertions::assert_eq;
use quarry::{Db, SyncConfig};
use quarry_sql::MigrationAction;
use tests::{
    connection,
    models::{Article, Profile, Tag, User},
    ExecLog,
};

fn db() -> (Db, ExecLog) {
    let (connection, log) = connection();

    let db = Db::builder()
        .register::<User>()
        .register::<Article>()
        .register::<Profile>()
        .register::<Tag>()
        .build(connection)
        .unwrap();

    (db, log)
}

async fn column_names(db: &Db, table: &str) -> Vec<String> {
    db.connection()
        .table_columns(table)
        .await
        .unwrap()
        .into_iter()
        .map(|column| column.name)
        .collect()
}

#[tokio::test]
async fn creates_entity_and_pivot_tables() {
    let (db, log) = db();

    let report = db.sync().await.unwrap();

    let tables: Vec<_> = report.tables.iter().map(|t| t.table.as_str()).collect();
    assert_eq!(tables, ["users", "articles", "profiles", "tags", "articles_tags"]);
    assert!(report
        .tables
        .iter()
        .all(|table| table.action == MigrationAction::Create));

    assert_eq!(log.len(), 5);
    assert_eq!(
        log.statements()[0],
        "CREATE TABLE users (id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT, \
         name TEXT NOT NULL, age NUMERIC, email TEXT, createdAt DATETIME, updatedAt DATETIME)"
    );
    assert_eq!(
        log.statements()[4],
        "CREATE TABLE articles_tags (articleId INTEGER NOT NULL, tagId INTEGER NOT NULL)"
    );

    assert_eq!(
        db.connection().tables().await.unwrap(),
        ["articles", "articles_tags", "profiles", "tags", "users"]
    );
    assert_eq!(
        column_names(&db, "articles").await,
        ["id", "userId", "title"]
    );
}

#[tokio::test]
async fn second_sync_is_unchanged() {
    let (db, log) = db();

    db.sync().await.unwrap();
    log.clear();

    let report = db.sync().await.unwrap();
    assert!(report.is_unchanged());
    assert_eq!(report.statements().count(), 0);
    assert!(log.is_empty());
}

#[tokio::test]
async fn dry_run_executes_nothing() {
    let (db, log) = db();

    let report = db
        .synchronizer(SyncConfig::new().dry_run(true))
        .run()
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.table("users").unwrap().action, MigrationAction::Create);
    assert_eq!(report.statements().count(), 5);

    assert!(log.is_empty());
    assert!(db.connection().tables().await.unwrap().is_empty());
}

#[tokio::test]
async fn rebuild_keeps_shared_columns() {
    let (db, log) = db();

    let connection = db.connection();
    connection
        .run(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, legacy TEXT)",
            &[],
        )
        .await
        .unwrap();
    connection
        .run(
            "INSERT INTO users (name, legacy) VALUES (?, ?)",
            &["Ann".into(), "old".into()],
        )
        .await
        .unwrap();
    log.clear();

    let report = db.sync().await.unwrap();
    assert_eq!(report.table("users").unwrap().action, MigrationAction::Rebuild);

    let users: Vec<_> = log
        .statements()
        .into_iter()
        .take_while(|sql| !sql.starts_with("CREATE TABLE articles"))
        .collect();

    assert_eq!(
        users,
        [
            "BEGIN",
            "DROP TABLE IF EXISTS __quarry_tmp_users",
            "CREATE TABLE __quarry_tmp_users (id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL, age NUMERIC, email TEXT, createdAt DATETIME, updatedAt DATETIME)",
            "INSERT INTO __quarry_tmp_users (id, name) SELECT id, name FROM users",
            "DROP TABLE users",
            "ALTER TABLE __quarry_tmp_users RENAME TO users",
            "COMMIT",
        ]
    );

    assert_eq!(
        column_names(&db, "users").await,
        ["id", "name", "age", "email", "createdAt", "updatedAt"]
    );

    let ann: User = db.find(1).await.unwrap();
    assert_eq!(ann.name, "Ann");

    assert!(db.sync().await.unwrap().is_unchanged());
}

#[tokio::test]
async fn type_change_rebuilds_the_table() {
    let (db, _log) = db();

    let connection = db.connection();
    connection
        .run(
            "CREATE TABLE profiles (id INTEGER PRIMARY KEY AUTOINCREMENT, userId TEXT, bio TEXT)",
            &[],
        )
        .await
        .unwrap();
    connection
        .run(
            "INSERT INTO profiles (userId, bio) VALUES (?, ?)",
            &["7".into(), "hi".into()],
        )
        .await
        .unwrap();

    let report = db.sync().await.unwrap();
    assert_eq!(
        report.table("profiles").unwrap().action,
        MigrationAction::Rebuild
    );

    let profile: Profile = db.find(1).await.unwrap();
    assert_eq!(profile.user_id, Some(7));
    assert_eq!(profile.bio.as_deref(), Some("hi"));

    let columns = db.connection().table_columns("profiles").await.unwrap();
    assert_eq!(columns[1].ty, "INTEGER");
}

#[tokio::test]
async fn rebuild_without_transaction() {
    let (db, log) = db();

    db.connection()
        .run("CREATE TABLE tags (id INTEGER PRIMARY KEY AUTOINCREMENT)", &[])
        .await
        .unwrap();
    log.clear();

    db.synchronizer(SyncConfig::new().rebuild_in_transaction(false))
        .run()
        .await
        .unwrap();

    let statements = log.statements();
    assert!(!statements.iter().any(|sql| sql == "BEGIN"));
    assert!(statements
        .iter()
        .any(|sql| sql == "INSERT INTO __quarry_tmp_tags (id, name) SELECT id, '' FROM tags"));
}

#[tokio::test]
async fn required_column_is_added_to_populated_table() {
    let (db, log) = db();

    let connection = db.connection();
    connection
        .run(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, age NUMERIC)",
            &[],
        )
        .await
        .unwrap();
    connection
        .run("INSERT INTO users (age) VALUES (?)", &[30.into()])
        .await
        .unwrap();
    log.clear();

    let report = db.sync().await.unwrap();
    assert_eq!(report.table("users").unwrap().action, MigrationAction::Rebuild);
    assert!(log.statements().iter().any(|sql| sql
        == "INSERT INTO __quarry_tmp_users (id, age, name) SELECT id, age, '' FROM users"));

    assert_eq!(
        column_names(&db, "users").await,
        ["id", "name", "age", "email", "createdAt", "updatedAt"]
    );

    let user: User = db.find(1).await.unwrap();
    assert_eq!(user.name, "");
    assert_eq!(user.age, Some(30));
}

#[tokio::test]
async fn failed_rebuild_rolls_back() {
    let (db, log) = db();

    let connection = db.connection();
    connection
        .run(
            "CREATE TABLE tags (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, color TEXT)",
            &[],
        )
        .await
        .unwrap();
    connection
        .run("INSERT INTO tags (name, color) VALUES (NULL, 'red')", &[])
        .await
        .unwrap();
    log.clear();

    // `name` becomes NOT NULL, so copying the existing row fails.
    let err = db.sync().await.unwrap_err();
    assert!(err.is_schema_sync_failed());
    assert!(err.is_driver_operation_failed());

    let (sql, _) = err.statement().unwrap();
    assert_eq!(sql, "INSERT INTO __quarry_tmp_tags (id, name) SELECT id, name FROM tags");
    assert_eq!(log.statements().last().unwrap(), "ROLLBACK");

    assert_eq!(column_names(&db, "tags").await, ["id", "name", "color"]);
    assert!(!db
        .connection()
        .table_exists("__quarry_tmp_tags")
        .await
        .unwrap());
}
