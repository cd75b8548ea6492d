use super::{hydrate_persisted, RelationSlot};
use crate::Entity;

use quarry_core::{stmt::Row, Result};

use std::fmt;

/// The entity the owner's foreign key column points at.
pub struct BelongsTo<T> {
    value: Option<Option<T>>,
}

impl<T: Entity> BelongsTo<T> {
    /// The parent entity, `None` if not loaded or the key is null.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref().and_then(Option::as_ref)
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take().flatten()
    }
}

impl<T: Entity> RelationSlot for BelongsTo<T> {
    fn fill(&mut self, rows: Vec<Row>) -> Result<()> {
        let value = match rows.into_iter().next() {
            Some(row) => Some(hydrate_persisted(row)?),
            None => None,
        };
        self.value = Some(value);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    fn unload(&mut self) {
        self.value = None;
    }
}

impl<T> Default for BelongsTo<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: fmt::Debug> fmt::Debug for BelongsTo<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => fmt::Debug::fmt(value, fmt),
            None => fmt.write_str("<not loaded>"),
        }
    }
}
