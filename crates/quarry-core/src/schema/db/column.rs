use super::Type;
use crate::driver::{ColumnInfo, StorageTypes};
use crate::schema::app::ColumnField;

/// A physical column, either declared or read back from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The database storage type of the column.
    pub ty: Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True if the column is the table's primary key
    pub primary_key: bool,

    /// True if the column is an integer that should be auto-incremented
    /// with each insertion of a new row.
    pub auto_increment: bool,
}

impl Column {
    pub fn from_field(field: &ColumnField, storage: &StorageTypes) -> Column {
        Column {
            name: field.column_name.clone(),
            ty: Type::from_logical(&field.ty, storage),
            nullable: field.nullable && !field.primary_key,
            primary_key: field.primary_key,
            auto_increment: field.is_auto_increment(),
        }
    }

    /// A live column as reported by introspection.
    pub fn from_info(info: &ColumnInfo) -> Column {
        Column {
            name: info.name.clone(),
            ty: Type::parse(&info.ty),
            nullable: info.nullable,
            primary_key: info.primary_key,
            auto_increment: info.auto_increment,
        }
    }

    /// Same column, stripped of key markers, as emitted by `ADD COLUMN`
    /// before a separate promotion statement.
    pub fn without_key(&self) -> Column {
        Column {
            primary_key: false,
            auto_increment: false,
            ..self.clone()
        }
    }
}
