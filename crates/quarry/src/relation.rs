mod belongs_to;
pub use belongs_to::BelongsTo;

mod belongs_to_many;
pub use belongs_to_many::BelongsToMany;

mod has_many;
pub use has_many::HasMany;

mod has_one;
pub use has_one::HasOne;

pub(crate) mod loader;

mod pivot;
pub use pivot::{Pivot, PivotChanges};

use crate::Entity;

use quarry_core::{stmt::Row, Result};

/// Prefix of the pivot key columns selected alongside many-to-many rows.
pub(crate) const PIVOT_PREFIX: &str = "__pivot_";

/// A relationship container as seen by the loader.
///
/// Containers start out not loaded. Filling one replaces whatever it held.
pub trait RelationSlot: Send {
    /// Hydrates related entities from `rows` and marks the container loaded.
    fn fill(&mut self, rows: Vec<Row>) -> Result<()>;

    fn is_loaded(&self) -> bool;

    /// Forgets loaded values so the next load queries again.
    fn unload(&mut self);
}

/// Hydrates a row read back from the database.
pub(crate) fn hydrate_persisted<T: Entity>(row: Row) -> Result<T> {
    let mut entity = T::hydrate(row)?;
    entity.state_mut().exists = true;
    Ok(entity)
}
