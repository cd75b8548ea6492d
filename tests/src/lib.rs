mod exec_log;
mod logging_connection;
pub mod models;

pub use exec_log::ExecLog;
pub use logging_connection::{ExecOp, LoggingConnection};

use models::{Article, Profile, Tag, User};
use quarry::Db;
use quarry_driver_sqlite::Sqlite;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per process. Output shows up
/// with `RUST_LOG=quarry=debug cargo test -- --nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A logging in-memory SQLite connection and a handle to its log.
pub fn connection() -> (LoggingConnection, ExecLog) {
    init_tracing();

    let connection = LoggingConnection::new(Sqlite::in_memory().unwrap());
    let log = ExecLog::new(connection.ops_log_handle());
    (connection, log)
}

/// A database with the fixture entities registered and their tables
/// created. The log starts out empty.
pub async fn setup() -> (Db, ExecLog) {
    let (connection, log) = connection();

    let db = Db::builder()
        .register::<User>()
        .register::<Article>()
        .register::<Profile>()
        .register::<Tag>()
        .build(connection)
        .unwrap();

    db.sync().await.unwrap();
    log.clear();

    (db, log)
}
