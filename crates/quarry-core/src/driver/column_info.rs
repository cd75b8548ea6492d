/// A live column as reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,

    /// Type name as the database spells it, e.g. `varchar(255)`
    pub ty: String,

    pub nullable: bool,

    pub primary_key: bool,

    pub auto_increment: bool,
}
