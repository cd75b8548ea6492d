use super::Statement;

/// A statement to copy rows from one table to another.
///
/// Generates: `INSERT INTO target (col1, col2, col3) SELECT col1, col2, 0 FROM source`
#[derive(Debug, Clone)]
pub struct CopyTable {
    /// Source table name.
    pub source: String,

    /// Target table name.
    pub target: String,

    /// Columns copied; the same names on both sides.
    pub columns: Vec<String>,

    /// Target-only columns set to a SQL literal for every copied row.
    pub filled: Vec<(String, String)>,
}

impl Statement {
    /// Creates a statement that copies rows from one table to another.
    pub fn copy_table(
        source: &str,
        target: &str,
        columns: Vec<String>,
        filled: Vec<(String, String)>,
    ) -> Self {
        CopyTable {
            source: source.to_string(),
            target: target.to_string(),
            columns,
            filled,
        }
        .into()
    }
}

impl From<CopyTable> for Statement {
    fn from(value: CopyTable) -> Self {
        Self::CopyTable(value)
    }
}
