use quarry::Db;
use quarry_cli::QuarryCli;
use quarry_driver_sqlite::Sqlite;

#[tokio::test]
async fn sync_with_no_entities_is_a_no_op() {
    let db = Db::builder().build(Sqlite::in_memory().unwrap()).unwrap();
    let cli = QuarryCli::new(db);

    cli.parse_from(["quarry", "sync", "--dry-run"]).await.unwrap();
    cli.parse_from(["quarry", "sync"]).await.unwrap();
}

#[tokio::test]
async fn unknown_commands_are_rejected() {
    let db = Db::builder().build(Sqlite::in_memory().unwrap()).unwrap();
    let cli = QuarryCli::new(db);

    assert!(cli.parse_from(["quarry", "migrate"]).await.is_err());
}
