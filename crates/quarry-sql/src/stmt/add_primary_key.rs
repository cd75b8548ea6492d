use super::Statement;

/// `ALTER TABLE ... ADD PRIMARY KEY (column)`.
#[derive(Debug, Clone)]
pub struct AddPrimaryKey {
    pub table: String,
    pub column: String,
}

impl Statement {
    pub fn add_primary_key(table: &str, column: &str) -> Self {
        AddPrimaryKey {
            table: table.to_string(),
            column: column.to_string(),
        }
        .into()
    }
}

impl From<AddPrimaryKey> for Statement {
    fn from(value: AddPrimaryKey) -> Self {
        Self::AddPrimaryKey(value)
    }
}
