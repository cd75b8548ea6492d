mod entity;
pub use entity::{EntityMetadata, EntityMetadataBuilder, EntityRef};

mod field;
pub use field::ColumnField;

mod logical_type;
pub use logical_type::LogicalType;

pub mod relation;
pub use relation::{PivotTable, RelationshipField, ResolvedRelation};

mod schema;
pub use schema::Schema;
