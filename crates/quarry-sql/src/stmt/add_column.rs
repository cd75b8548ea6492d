use super::{ColumnDef, Statement};

use quarry_core::schema::db::Column;

/// A statement to add a column to a table.
#[derive(Debug, Clone)]
pub struct AddColumn {
    /// Name of the table to add the column to.
    pub table: String,

    /// Column definition, without key markers.
    pub column: ColumnDef,
}

impl Statement {
    /// Adds a column to a table. Key markers are left to a later
    /// [`Statement::add_primary_key`].
    pub fn add_column(table: &str, column: &Column) -> Self {
        AddColumn {
            table: table.to_string(),
            column: ColumnDef::from_column(column).without_key(),
        }
        .into()
    }
}

impl From<AddColumn> for Statement {
    fn from(value: AddColumn) -> Self {
        Self::AddColumn(value)
    }
}
