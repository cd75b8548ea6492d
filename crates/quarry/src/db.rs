mod builder;
pub use builder::Builder;

mod connect;

mod crud;

mod related;

use crate::{sync::Synchronizer, Entity, EntityQuery, SyncConfig, SyncReport};

use quarry_core::{
    driver::{Capability, Connection},
    schema::app::Schema,
    stmt::{Query, Row, Value},
    Result,
};
use quarry_sql::{Compiled, Serializer, Statement};

use std::{fmt, sync::Arc};

/// A handle to a database and the entities registered with it.
///
/// Cloning is cheap; clones share the same connection.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

struct Shared {
    connection: Arc<dyn Connection>,
    schema: Schema,
    serializer: Serializer,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.shared.connection
    }

    /// Entities registered with this handle.
    pub fn schema(&self) -> &Schema {
        &self.shared.schema
    }

    pub fn capability(&self) -> &'static Capability {
        self.shared.connection.capability()
    }

    /// The serializer for this database's dialect.
    pub fn serializer(&self) -> Serializer {
        self.shared.serializer
    }

    /// Starts a query over `E`'s table.
    pub fn query<E: Entity>(&self) -> EntityQuery<'_, E> {
        EntityQuery::new(self)
    }

    /// Renders a statement in this database's dialect.
    pub fn compile(&self, stmt: impl Into<Statement>) -> Result<Compiled> {
        self.shared.serializer.compile(stmt)
    }

    /// Executes a statement and returns the number of affected rows.
    pub async fn exec(&self, stmt: impl Into<Statement>) -> Result<u64> {
        let compiled = self.compile(stmt)?;
        self.exec_compiled(&compiled).await
    }

    /// Runs a query and returns every row.
    pub async fn fetch(&self, query: Query) -> Result<Vec<Row>> {
        let compiled = self.compile(query)?;
        self.fetch_compiled(&compiled).await
    }

    /// Runs a query and returns its first row.
    pub async fn fetch_first(&self, query: Query) -> Result<Option<Row>> {
        let compiled = self.compile(query)?;
        self.fetch_first_compiled(&compiled).await
    }

    pub(crate) async fn exec_compiled(&self, compiled: &Compiled) -> Result<u64> {
        tracing::debug!(sql = %compiled.sql, bindings = ?compiled.bindings, "exec");
        self.shared
            .connection
            .run(&compiled.sql, &compiled.bindings)
            .await
    }

    pub(crate) async fn fetch_compiled(&self, compiled: &Compiled) -> Result<Vec<Row>> {
        tracing::debug!(sql = %compiled.sql, bindings = ?compiled.bindings, "fetch");
        self.shared
            .connection
            .get(&compiled.sql, &compiled.bindings)
            .await
    }

    pub(crate) async fn fetch_first_compiled(&self, compiled: &Compiled) -> Result<Option<Row>> {
        tracing::debug!(sql = %compiled.sql, bindings = ?compiled.bindings, "fetch first");
        self.shared
            .connection
            .first(&compiled.sql, &compiled.bindings)
            .await
    }

    pub(crate) async fn insert_compiled(&self, compiled: &Compiled) -> Result<Value> {
        tracing::debug!(sql = %compiled.sql, bindings = ?compiled.bindings, "insert");
        self.shared
            .connection
            .insert_one(&compiled.sql, &compiled.bindings)
            .await
    }

    /// Removes every row from `E`'s table.
    pub async fn truncate<E: Entity>(&self) -> Result<()> {
        let table = &E::metadata().table;
        tracing::debug!(table = %table, "truncate");
        self.shared.connection.truncate(table).await
    }

    /// A schema synchronizer over the registered entities.
    pub fn synchronizer(&self, config: SyncConfig) -> Synchronizer<'_> {
        Synchronizer::new(self, config)
    }

    /// Brings the live schema in line with the registered entities using the
    /// default configuration.
    pub async fn sync(&self) -> Result<SyncReport> {
        self.synchronizer(SyncConfig::default()).run().await
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("connection", &self.shared.connection)
            .field("entities", &self.shared.schema.entities.len())
            .finish()
    }
}
