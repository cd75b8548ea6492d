use super::Statement;

/// A statement to alter a SQL table.
#[derive(Debug, Clone)]
pub struct AlterTable {
    /// Current name of the table.
    pub name: String,

    /// The alteration to apply.
    pub action: AlterTableAction,
}

/// The action to perform in an ALTER TABLE statement.
#[derive(Debug, Clone)]
pub enum AlterTableAction {
    /// Rename the table to a new name.
    RenameTo(String),
}

impl Statement {
    /// Renames a table.
    pub fn alter_table_rename_to(name: &str, new_name: &str) -> Self {
        AlterTable {
            name: name.to_string(),
            action: AlterTableAction::RenameTo(new_name.to_string()),
        }
        .into()
    }
}

impl From<AlterTable> for Statement {
    fn from(value: AlterTable) -> Self {
        Self::AlterTable(value)
    }
}
