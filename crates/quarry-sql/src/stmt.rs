mod add_column;
pub use add_column::AddColumn;

mod add_primary_key;
pub use add_primary_key::AddPrimaryKey;

mod alter_table;
pub use alter_table::{AlterTable, AlterTableAction};

mod column_def;
pub use column_def::ColumnDef;

mod copy_table;
pub use copy_table::CopyTable;

mod create_table;
pub use create_table::CreateTable;

mod drop_column;
pub use drop_column::DropColumn;

mod drop_table;
pub use drop_table::DropTable;

mod modify_column;
pub use modify_column::ModifyColumn;

mod transaction;
pub use transaction::Transaction;

pub use quarry_core::stmt::*;

/// Every statement the serializer can render.
#[derive(Debug, Clone)]
pub enum Statement {
    /// `SELECT`, `INSERT`, `UPDATE` or `DELETE`, per the query's kind
    Query(Query),
    AddColumn(AddColumn),
    AddPrimaryKey(AddPrimaryKey),
    AlterTable(AlterTable),
    CopyTable(CopyTable),
    CreateTable(CreateTable),
    DropColumn(DropColumn),
    DropTable(DropTable),
    ModifyColumn(ModifyColumn),
    Transaction(Transaction),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Query(_))
    }

    /// True for statements that change the schema.
    pub fn is_ddl(&self) -> bool {
        !matches!(self, Statement::Query(_) | Statement::Transaction(_))
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Statement::Query(value)
    }
}
