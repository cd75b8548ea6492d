use crate::Db;

use quarry_core::{
    schema::db::{Column, Table},
    Error, Result,
};
use quarry_sql::{
    stmt::Transaction, MigrationAction, MigrationOptions, Statement, TableMigration,
};

/// Controls how [`Synchronizer`] converges the live schema.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Plan only; nothing is executed
    pub dry_run: bool,

    /// Wrap each table rebuild in a transaction when the database supports
    /// transactional DDL.
    pub rebuild_in_transaction: bool,

    /// Name prefix of the temporary table used by rebuilds
    pub temp_table_prefix: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let options = MigrationOptions::default();
        Self {
            dry_run: false,
            rebuild_in_transaction: options.rebuild_in_transaction,
            temp_table_prefix: options.temp_table_prefix,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn rebuild_in_transaction(mut self, enabled: bool) -> Self {
        self.rebuild_in_transaction = enabled;
        self
    }

    pub fn temp_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_table_prefix = prefix.into();
        self
    }

    fn migration_options(&self) -> MigrationOptions {
        MigrationOptions {
            rebuild_in_transaction: self.rebuild_in_transaction,
            temp_table_prefix: self.temp_table_prefix.clone(),
        }
    }
}

/// What a synchronization did, or would do in a dry run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// One entry per declared table, entity tables first, then pivot tables
    pub tables: Vec<TableMigration>,

    /// True if nothing was executed
    pub dry_run: bool,
}

impl SyncReport {
    /// Every planned statement, in execution order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.tables.iter().flat_map(TableMigration::statements)
    }

    pub fn is_unchanged(&self) -> bool {
        self.tables.iter().all(TableMigration::is_unchanged)
    }

    pub fn table(&self, name: &str) -> Option<&TableMigration> {
        self.tables.iter().find(|table| table.table == name)
    }
}

/// Converges the live schema with the registered entities.
///
/// Missing tables are created. Existing tables are altered in place when the
/// database supports it and rebuilt through a temporary table otherwise.
/// Pivot tables of many-to-many relationships are created like any other
/// table.
#[derive(Debug)]
pub struct Synchronizer<'a> {
    db: &'a Db,
    config: SyncConfig,
}

impl<'a> Synchronizer<'a> {
    pub(crate) fn new(db: &'a Db, config: SyncConfig) -> Synchronizer<'a> {
        Synchronizer { db, config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Tables the registered entities declare, in registration order,
    /// followed by pivot tables.
    pub fn declared_tables(&self) -> Result<Vec<Table>> {
        let schema = self.db.schema();
        let storage = &self.db.capability().storage_types;

        let mut tables: Vec<Table> = schema
            .entities
            .iter()
            .map(|entity| Table::from_entity(entity, storage))
            .collect();

        for pivot in schema.pivot_tables()? {
            if tables.iter().any(|table| table.name == pivot.table) {
                continue;
            }
            tables.push(Table::from_pivot(&pivot, storage));
        }

        Ok(tables)
    }

    /// Reads the live shape of `name`, `None` if it does not exist.
    pub async fn live_table(&self, name: &str) -> Result<Option<Table>> {
        let connection = self.db.connection();

        if !connection.table_exists(name).await? {
            return Ok(None);
        }

        let columns = connection
            .table_columns(name)
            .await?
            .iter()
            .map(Column::from_info)
            .collect();

        Ok(Some(Table {
            name: name.to_string(),
            columns,
        }))
    }

    /// Plans every table without executing anything.
    pub async fn plan(&self) -> Result<Vec<TableMigration>> {
        let capability = self.db.capability();
        let options = self.config.migration_options();

        let mut plan = vec![];
        for declared in self.declared_tables()? {
            let live = self.live_table(&declared.name).await?;
            plan.push(TableMigration::plan(
                live.as_ref(),
                &declared,
                capability,
                &options,
            ));
        }

        Ok(plan)
    }

    /// Plans and, unless configured as a dry run, executes every table's
    /// migration in order.
    pub async fn run(&self) -> Result<SyncReport> {
        let tables = self.plan().await?;

        for migration in &tables {
            tracing::info!(
                table = %migration.table,
                action = action_name(migration.action),
                statements = migration.statements.len(),
                dry_run = self.config.dry_run,
                "sync table"
            );

            if !self.config.dry_run {
                self.execute(migration).await?;
            }
        }

        Ok(SyncReport {
            tables,
            dry_run: self.config.dry_run,
        })
    }

    async fn execute(&self, migration: &TableMigration) -> Result<()> {
        let connection = self.db.connection();
        let mut in_transaction = false;

        for statement in migration.statements() {
            let compiled = self.db.compile(statement.clone())?;
            tracing::debug!(table = %migration.table, sql = %compiled.sql, "ddl");

            if let Err(err) = connection.run(&compiled.sql, &compiled.bindings).await {
                tracing::warn!(
                    table = %migration.table,
                    sql = %compiled.sql,
                    error = %err,
                    "schema sync failed"
                );

                if in_transaction {
                    self.rollback().await;
                }

                return Err(err.context(Error::schema_sync_failed(
                    &migration.table,
                    compiled.sql,
                )));
            }

            match statement {
                Statement::Transaction(Transaction::Begin) => in_transaction = true,
                Statement::Transaction(_) => in_transaction = false,
                _ => {}
            }
        }

        Ok(())
    }

    /// Rolls back a failed rebuild. The original failure is what gets
    /// reported, so a failing rollback is only logged.
    async fn rollback(&self) {
        let sql = match self.db.compile(Statement::rollback()) {
            Ok(compiled) => compiled.sql,
            Err(err) => {
                tracing::warn!(error = %err, "rollback failed");
                return;
            }
        };

        if let Err(err) = self.db.connection().run(&sql, &[]).await {
            tracing::warn!(error = %err, "rollback failed");
        }
    }
}

fn action_name(action: MigrationAction) -> &'static str {
    match action {
        MigrationAction::Create => "create",
        MigrationAction::Alter => "alter",
        MigrationAction::Rebuild => "rebuild",
        MigrationAction::Unchanged => "unchanged",
    }
}
