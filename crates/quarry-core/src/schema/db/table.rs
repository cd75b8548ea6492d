use super::Column;
use crate::driver::StorageTypes;
use crate::schema::app::{relation::PivotTable, EntityMetadata};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name of the table
    pub name: String,

    /// The table's columns, in declaration order
    pub columns: Vec<Column>,
}

impl Table {
    /// The table declared by an entity's column fields.
    pub fn from_entity(entity: &EntityMetadata, storage: &StorageTypes) -> Table {
        Table {
            name: entity.table.clone(),
            columns: entity
                .columns
                .values()
                .map(|field| Column::from_field(field, storage))
                .collect(),
        }
    }

    /// A pivot table: two non-null reference columns, sorted by name.
    pub fn from_pivot(pivot: &PivotTable, storage: &StorageTypes) -> Table {
        Table {
            name: pivot.table.clone(),
            columns: pivot
                .columns()
                .into_iter()
                .map(|name| Column {
                    name: name.to_string(),
                    ty: storage.reference.clone(),
                    nullable: false,
                    primary_key: false,
                    auto_increment: false,
                })
                .collect(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.primary_key)
    }

    /// Names of columns present in both tables, in this table's order.
    pub fn shared_columns<'a>(&'a self, other: &Table) -> Vec<&'a str> {
        self.columns
            .iter()
            .filter(|column| other.column(&column.name).is_some())
            .map(|column| column.name.as_str())
            .collect()
    }
}
