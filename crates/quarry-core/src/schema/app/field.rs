use super::LogicalType;

/// A column declared on an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnField {
    /// Column name in the database. Empty until the entity builder fills it
    /// in with the property name.
    pub column_name: String,

    pub ty: LogicalType,

    pub primary_key: bool,

    /// Stamped with the current time when the entity is first saved
    pub created_at: bool,

    /// Stamped with the current time on every save
    pub updated_at: bool,

    /// Columns are nullable unless marked required.
    pub nullable: bool,
}

impl ColumnField {
    pub fn new(ty: LogicalType) -> ColumnField {
        ColumnField {
            column_name: String::new(),
            ty,
            primary_key: false,
            created_at: false,
            updated_at: false,
            nullable: true,
        }
    }

    pub fn primary_key() -> ColumnField {
        ColumnField {
            primary_key: true,
            nullable: false,
            ..ColumnField::new(LogicalType::PrimaryKey)
        }
    }

    pub fn string() -> ColumnField {
        ColumnField::new(LogicalType::String)
    }

    pub fn number() -> ColumnField {
        ColumnField::new(LogicalType::Number)
    }

    pub fn boolean() -> ColumnField {
        ColumnField::new(LogicalType::Boolean)
    }

    pub fn date() -> ColumnField {
        ColumnField::new(LogicalType::Date)
    }

    pub fn reference() -> ColumnField {
        ColumnField::new(LogicalType::EntityReference)
    }

    pub fn custom(ty: impl Into<String>) -> ColumnField {
        ColumnField::new(LogicalType::Custom(ty.into()))
    }

    pub fn created_at() -> ColumnField {
        ColumnField {
            created_at: true,
            ..ColumnField::date()
        }
    }

    pub fn updated_at() -> ColumnField {
        ColumnField {
            updated_at: true,
            ..ColumnField::date()
        }
    }

    /// Overrides the column name.
    pub fn column(mut self, name: impl Into<String>) -> ColumnField {
        self.column_name = name.into();
        self
    }

    /// Adds a `NOT NULL` constraint.
    pub fn required(mut self) -> ColumnField {
        self.nullable = false;
        self
    }

    pub fn is_auto_increment(&self) -> bool {
        self.primary_key && self.ty == LogicalType::PrimaryKey
    }
}
