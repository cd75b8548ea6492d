use crate::schema::db;

#[derive(Debug)]
pub struct Capability {
    /// Which SQL dialect the database speaks.
    pub dialect: Dialect,

    /// Supports `ALTER TABLE ... ADD/MODIFY/DROP COLUMN`. When false, tables
    /// are rebuilt to change their shape.
    pub alter_table: bool,

    /// DDL statements can run inside a transaction.
    pub transactional_ddl: bool,

    /// Column storage types supported by the database
    pub storage_types: StorageTypes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Mysql,
}

/// Storage type for each logical column type.
#[derive(Debug)]
pub struct StorageTypes {
    pub primary_key: db::Type,
    pub reference: db::Type,
    pub number: db::Type,
    pub boolean: db::Type,
    pub date: db::Type,
    pub string: db::Type,

    /// Fallback for custom logical types.
    pub default_text: db::Type,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        dialect: Dialect::Sqlite,
        alter_table: false,
        transactional_ddl: true,
        storage_types: StorageTypes::SQLITE,
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        dialect: Dialect::Mysql,
        alter_table: true,

        // MySQL commits implicitly around every DDL statement.
        transactional_ddl: false,
        storage_types: StorageTypes::MYSQL,
    };
}

impl StorageTypes {
    /// SQLite storage types
    pub const SQLITE: StorageTypes = StorageTypes {
        primary_key: db::Type::Integer,
        reference: db::Type::Integer,
        number: db::Type::Numeric,
        boolean: db::Type::Boolean,
        date: db::Type::DateTime,
        string: db::Type::Text,
        default_text: db::Type::Text,
    };

    pub const MYSQL: StorageTypes = StorageTypes {
        primary_key: db::Type::Int,
        reference: db::Type::Int,
        number: db::Type::Double,
        boolean: db::Type::TinyInt(1),
        date: db::Type::DateTime,
        string: db::Type::VarChar(255),
        default_text: db::Type::Text,
    };
}
