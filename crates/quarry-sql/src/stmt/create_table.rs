use super::{ColumnDef, Statement};

use quarry_core::schema::db::Table;

/// A statement to create a SQL table.
#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table.
    pub name: String,

    /// Column definitions, with key markers inline.
    pub columns: Vec<ColumnDef>,
}

impl Statement {
    /// Creates a table with every declared column.
    pub fn create_table(table: &Table) -> Self {
        Statement::create_table_named(table, &table.name)
    }

    /// Creates a table shaped like `table` under a different name.
    pub fn create_table_named(table: &Table, name: &str) -> Self {
        CreateTable {
            name: name.to_string(),
            columns: table.columns.iter().map(ColumnDef::from_column).collect(),
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
