mod capability;
pub use capability::{Capability, Dialect, StorageTypes};

mod column_info;
pub use column_info::ColumnInfo;

use crate::{
    async_trait,
    stmt::{Row, Value},
    Result,
};

use std::fmt::Debug;

/// A live database connection.
///
/// Every statement is SQL text with positional `?` placeholders and the
/// values bound to them, in order.
#[async_trait]
pub trait Connection: Debug + Send + Sync + 'static {
    /// Describes the database behind this connection.
    fn capability(&self) -> &'static Capability;

    /// Executes a statement, returning the number of affected rows.
    async fn run(&self, sql: &str, bindings: &[Value]) -> Result<u64>;

    /// Executes an insert and returns the generated key.
    async fn insert_one(&self, sql: &str, bindings: &[Value]) -> Result<Value>;

    /// Executes a query and returns every row.
    async fn get(&self, sql: &str, bindings: &[Value]) -> Result<Vec<Row>>;

    /// Executes a query and returns the first row, if any.
    async fn first(&self, sql: &str, bindings: &[Value]) -> Result<Option<Row>> {
        Ok(self.get(sql, bindings).await?.into_iter().next())
    }

    /// Lists the tables in the database.
    async fn tables(&self) -> Result<Vec<String>>;

    async fn table_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tables().await?.iter().any(|table| table == name))
    }

    /// Lists a table's live columns.
    async fn table_columns(&self, name: &str) -> Result<Vec<ColumnInfo>>;

    /// Removes every row from `table`.
    async fn truncate(&self, table: &str) -> Result<()>;
}
