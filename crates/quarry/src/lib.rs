pub mod db;
pub use db::Db;

mod entity;
pub use entity::{Entity, EntityState};

mod page;
pub use page::Page;

mod query;
pub use query::EntityQuery;

pub mod relation;
pub use relation::{
    BelongsTo, BelongsToMany, HasMany, HasOne, Pivot, PivotChanges, RelationSlot,
};

pub mod sync;
pub use sync::{SyncConfig, SyncReport, Synchronizer};

pub use quarry_core::{
    async_trait, bail,
    driver::{self, Connection},
    err,
    schema::{
        self,
        app::{ColumnField, EntityMetadata, EntityRef, LogicalType},
    },
    Error, Result,
};

pub mod stmt {
    pub use quarry_core::stmt::*;
    pub use quarry_sql::{Compiled, QueryExt, Statement};
}
