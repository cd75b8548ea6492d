/// The declared type of an entity column, before it is mapped to a storage
/// type for a specific database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    String,
    Number,
    Boolean,
    Date,

    /// A column holding another entity's primary key
    EntityReference,

    /// An auto-incrementing integer primary key
    PrimaryKey,

    /// Anything else; stored using the database's default text type
    Custom(String),
}
