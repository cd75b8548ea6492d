use quarry_core::{
    driver::Capability,
    schema::db::{ColumnsDiff, ColumnsDiffItem, Table},
};

use crate::stmt::Statement;

/// How a table is brought in line with its declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationAction {
    /// The table does not exist yet
    Create,

    /// Columns are changed in place with `ALTER TABLE`
    Alter,

    /// The table is recreated under a temporary name, its data copied over,
    /// and the temporary table renamed back.
    Rebuild,

    /// Live and declared shapes already match
    Unchanged,
}

/// Knobs for table rebuilds.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Wrap each rebuild in `BEGIN` / `COMMIT` when the database supports
    /// transactional DDL.
    pub rebuild_in_transaction: bool,

    /// Prefix for the temporary table a rebuild goes through.
    pub temp_table_prefix: String,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        MigrationOptions {
            rebuild_in_transaction: true,
            temp_table_prefix: "__quarry_tmp_".to_string(),
        }
    }
}

/// A statement produced while migrating one table.
#[derive(Debug, Clone)]
pub struct MigrationStatement {
    statement: Statement,

    /// Part of the key promotion pass that runs after columns are in shape
    promotion: bool,
}

impl MigrationStatement {
    fn new(statement: impl Into<Statement>) -> Self {
        MigrationStatement {
            statement: statement.into(),
            promotion: false,
        }
    }

    fn promotion(statement: impl Into<Statement>) -> Self {
        MigrationStatement {
            statement: statement.into(),
            promotion: true,
        }
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn into_statement(self) -> Statement {
        self.statement
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion
    }
}

/// The ordered statements that migrate a single table.
#[derive(Debug, Clone)]
pub struct TableMigration {
    pub table: String,
    pub action: MigrationAction,
    pub statements: Vec<MigrationStatement>,
}

impl TableMigration {
    /// Plans the migration from `live` (`None` if the table is missing) to
    /// `declared`.
    pub fn plan(
        live: Option<&Table>,
        declared: &Table,
        capability: &Capability,
        options: &MigrationOptions,
    ) -> TableMigration {
        let Some(live) = live else {
            return TableMigration {
                table: declared.name.clone(),
                action: MigrationAction::Create,
                statements: vec![MigrationStatement::new(Statement::create_table(declared))],
            };
        };

        let diff = ColumnsDiff::from(live, declared);

        if diff.is_empty() {
            return TableMigration {
                table: declared.name.clone(),
                action: MigrationAction::Unchanged,
                statements: vec![],
            };
        }

        if capability.alter_table {
            TableMigration {
                table: declared.name.clone(),
                action: MigrationAction::Alter,
                statements: alter_in_place(&declared.name, &diff),
            }
        } else {
            let in_transaction = options.rebuild_in_transaction && capability.transactional_ddl;
            TableMigration {
                table: declared.name.clone(),
                action: MigrationAction::Rebuild,
                statements: rebuild(live, declared, &options.temp_table_prefix, in_transaction),
            }
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.action == MigrationAction::Unchanged
    }

    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter().map(MigrationStatement::statement)
    }
}

fn alter_in_place(table: &str, diff: &ColumnsDiff<'_>) -> Vec<MigrationStatement> {
    let mut result = vec![];

    for item in diff.iter() {
        match item {
            ColumnsDiffItem::DropColumn(column) => {
                result.push(MigrationStatement::new(Statement::drop_column(
                    table,
                    &column.name,
                )));
            }
            ColumnsDiffItem::AddColumn(column) => {
                result.push(MigrationStatement::new(Statement::add_column(
                    table, column,
                )));
            }
            ColumnsDiffItem::AlterColumn { from, to } => {
                // An existing key column keeps its key markers through the
                // type change.
                let statement = if from.primary_key && to.auto_increment {
                    Statement::modify_auto_increment(table, to)
                } else {
                    Statement::modify_column(table, to)
                };
                result.push(MigrationStatement::new(statement));
            }
            ColumnsDiffItem::PromoteColumn(column) => {
                result.push(MigrationStatement::promotion(Statement::add_primary_key(
                    table,
                    &column.name,
                )));
                if column.auto_increment {
                    result.push(MigrationStatement::promotion(
                        Statement::modify_auto_increment(table, column),
                    ));
                }
            }
        }
    }

    result
}

fn rebuild(
    live: &Table,
    declared: &Table,
    temp_table_prefix: &str,
    in_transaction: bool,
) -> Vec<MigrationStatement> {
    let temp = format!("{temp_table_prefix}{}", declared.name);
    let shared: Vec<String> = declared
        .shared_columns(live)
        .into_iter()
        .map(str::to_string)
        .collect();

    // New `NOT NULL` columns get a placeholder value in existing rows, as an
    // in-place `ADD COLUMN` would give them.
    let filled: Vec<(String, String)> = declared
        .columns
        .iter()
        .filter(|column| !column.nullable && !column.auto_increment)
        .filter(|column| live.column(&column.name).is_none())
        .map(|column| (column.name.clone(), column.ty.implicit_default().to_string()))
        .collect();

    let mut result = vec![];

    if in_transaction {
        result.push(MigrationStatement::new(Statement::begin()));
    }

    // Left over from an earlier rebuild that did not finish.
    result.push(MigrationStatement::new(Statement::drop_table_if_exists(
        &temp,
    )));
    result.push(MigrationStatement::new(Statement::create_table_named(
        declared, &temp,
    )));

    if !shared.is_empty() {
        result.push(MigrationStatement::new(Statement::copy_table(
            &live.name, &temp, shared, filled,
        )));
    }

    result.push(MigrationStatement::new(Statement::drop_table(&live.name)));
    result.push(MigrationStatement::new(Statement::alter_table_rename_to(
        &temp,
        &declared.name,
    )));

    if in_transaction {
        result.push(MigrationStatement::new(Statement::commit()));
    }

    result
}
