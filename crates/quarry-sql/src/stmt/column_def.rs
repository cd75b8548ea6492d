use quarry_core::schema::db::{self, Column};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: db::Type,
    pub not_null: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
}

impl ColumnDef {
    pub fn from_column(column: &Column) -> ColumnDef {
        ColumnDef {
            name: column.name.clone(),
            ty: column.ty.clone(),
            not_null: !column.nullable,
            primary_key: column.primary_key,
            auto_increment: column.auto_increment,
        }
    }

    /// The same definition without key markers.
    pub fn without_key(mut self) -> ColumnDef {
        self.primary_key = false;
        self.auto_increment = false;
        self
    }
}
