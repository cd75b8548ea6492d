use super::{ColumnDef, Statement};

use quarry_core::schema::db::Column;

/// `ALTER TABLE ... MODIFY COLUMN`: re-declares a column.
#[derive(Debug, Clone)]
pub struct ModifyColumn {
    pub table: String,
    pub column: ColumnDef,
}

impl Statement {
    /// Re-declares `column` with its declared type. Key markers are dropped.
    pub fn modify_column(table: &str, column: &Column) -> Self {
        ModifyColumn {
            table: table.to_string(),
            column: ColumnDef::from_column(column).without_key(),
        }
        .into()
    }

    /// Marks an existing key column as auto-incrementing.
    pub fn modify_auto_increment(table: &str, column: &Column) -> Self {
        let mut def = ColumnDef::from_column(column).without_key();
        def.auto_increment = true;
        def.not_null = true;

        ModifyColumn {
            table: table.to_string(),
            column: def,
        }
        .into()
    }
}

impl From<ModifyColumn> for Statement {
    fn from(value: ModifyColumn) -> Self {
        Self::ModifyColumn(value)
    }
}
