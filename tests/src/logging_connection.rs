use async_trait::async_trait;
use quarry_core::{
    driver::{Capability, ColumnInfo, Connection},
    stmt::{Row, Value},
    Result,
};
use std::sync::{Arc, Mutex};

/// One statement sent to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecOp {
    pub sql: String,
    pub bindings: Vec<Value>,
}

/// A connection wrapper that logs every statement for testing purposes
///
/// Catalog reads (`tables`, `table_columns`) and `truncate` go straight to
/// the inner connection and are not logged.
#[derive(Debug)]
pub struct LoggingConnection {
    /// The underlying connection that actually executes statements
    inner: Box<dyn Connection>,

    /// Log of all statements executed through this connection
    /// Using Arc<Mutex> for thread-safe access from tests
    ops_log: Arc<Mutex<Vec<ExecOp>>>,
}

impl LoggingConnection {
    pub fn new(inner: impl Connection) -> Self {
        Self {
            inner: Box::new(inner),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the statement log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<ExecOp>>> {
        self.ops_log.clone()
    }

    fn log(&self, sql: &str, bindings: &[Value]) {
        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(ExecOp {
                sql: sql.to_string(),
                bindings: bindings.to_vec(),
            });
    }
}

#[async_trait]
impl Connection for LoggingConnection {
    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    async fn run(&self, sql: &str, bindings: &[Value]) -> Result<u64> {
        self.log(sql, bindings);
        self.inner.run(sql, bindings).await
    }

    async fn insert_one(&self, sql: &str, bindings: &[Value]) -> Result<Value> {
        self.log(sql, bindings);
        self.inner.insert_one(sql, bindings).await
    }

    async fn get(&self, sql: &str, bindings: &[Value]) -> Result<Vec<Row>> {
        self.log(sql, bindings);
        self.inner.get(sql, bindings).await
    }

    async fn first(&self, sql: &str, bindings: &[Value]) -> Result<Option<Row>> {
        self.log(sql, bindings);
        self.inner.first(sql, bindings).await
    }

    async fn tables(&self) -> Result<Vec<String>> {
        self.inner.tables().await
    }

    async fn table_columns(&self, name: &str) -> Result<Vec<ColumnInfo>> {
        self.inner.table_columns(name).await
    }

    async fn truncate(&self, table: &str) -> Result<()> {
        self.inner.truncate(table).await
    }
}
