use crate::driver::StorageTypes;
use crate::schema::app::LogicalType;

/// Database storage types, as they appear in `CREATE TABLE` statements.
///
/// `Display` renders the SQL spelling and [`Type::parse`] reads back what
/// introspection reports, so a declared type compares equal to the live one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// SQLite `INTEGER`
    Integer,

    /// MySQL `INT`
    Int,

    Real,
    Numeric,
    Double,
    Boolean,

    /// `TINYINT(n)`; MySQL's boolean is `TINYINT(1)`
    TinyInt(u8),

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    DateTime,

    /// Unconstrained binary type
    Blob,

    /// Unrecognized type, kept verbatim
    Other(String),
}

impl Type {
    /// Maps a declared logical type to the storage type for a database.
    pub fn from_logical(ty: &LogicalType, storage: &StorageTypes) -> Type {
        match ty {
            LogicalType::PrimaryKey => storage.primary_key.clone(),
            LogicalType::EntityReference => storage.reference.clone(),
            LogicalType::Number => storage.number.clone(),
            LogicalType::Boolean => storage.boolean.clone(),
            LogicalType::Date => storage.date.clone(),
            LogicalType::String => storage.string.clone(),
            LogicalType::Custom(_) => storage.default_text.clone(),
        }
    }

    /// Parses a type name reported by the database. Matching is
    /// case-insensitive and ignores display widths on `INT`.
    pub fn parse(src: &str) -> Type {
        let src = src.trim();
        let lower = src.to_ascii_lowercase();

        let (name, arg) = match lower.split_once('(') {
            Some((name, rest)) => (name.trim(), rest.trim_end_matches(')').trim().parse::<u64>().ok()),
            None => (lower.as_str(), None),
        };

        match (name, arg) {
            ("integer", None) => Type::Integer,
            ("int", _) => Type::Int,
            ("real", None) => Type::Real,
            ("numeric", None) => Type::Numeric,
            ("double" | "double precision", None) => Type::Double,
            ("boolean" | "bool", None) => Type::Boolean,
            ("tinyint", Some(n)) if n <= u8::MAX as u64 => Type::TinyInt(n as u8),
            ("tinyint", None) => Type::TinyInt(4),
            ("text", None) => Type::Text,
            ("varchar", Some(n)) => Type::VarChar(n),
            ("datetime", None) => Type::DateTime,
            ("blob", None) => Type::Blob,
            _ => Type::Other(src.to_string()),
        }
    }

    /// SQL literal stored in existing rows when a `NOT NULL` column of this
    /// type is added without a default. Follows MySQL, except that dates
    /// start at the Unix epoch.
    pub fn implicit_default(&self) -> &'static str {
        match self {
            Type::Integer
            | Type::Int
            | Type::Real
            | Type::Numeric
            | Type::Double
            | Type::Boolean
            | Type::TinyInt(_) => "0",
            Type::DateTime => "'1970-01-01 00:00:00'",
            Type::Blob => "X''",
            Type::Text | Type::VarChar(_) | Type::Other(_) => "''",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer | Type::Int)
    }
}

impl core::fmt::Display for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Type::Integer => f.write_str("INTEGER"),
            Type::Int => f.write_str("INT"),
            Type::Real => f.write_str("REAL"),
            Type::Numeric => f.write_str("NUMERIC"),
            Type::Double => f.write_str("DOUBLE"),
            Type::Boolean => f.write_str("BOOLEAN"),
            Type::TinyInt(n) => write!(f, "TINYINT({n})"),
            Type::Text => f.write_str("TEXT"),
            Type::VarChar(n) => write!(f, "VARCHAR({n})"),
            Type::DateTime => f.write_str("DATETIME"),
            Type::Blob => f.write_str("BLOB"),
            Type::Other(name) => f.write_str(name),
        }
    }
}
