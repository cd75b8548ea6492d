pub mod introspect;

pub mod migration;
pub use migration::{MigrationAction, MigrationOptions, MigrationStatement, TableMigration};

mod query_ext;
pub use query_ext::QueryExt;

pub mod serializer;
pub use serializer::{Compiled, Params, Serializer};

pub mod stmt;
pub use stmt::Statement;
