use super::{hydrate_persisted, RelationSlot};
use crate::Entity;

use quarry_core::{stmt::Row, Result};

use std::fmt;

/// One related entity whose table points back at the owner.
pub struct HasOne<T> {
    value: Option<Option<T>>,
}

impl<T: Entity> HasOne<T> {
    /// The related entity, `None` if not loaded or absent.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref().and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut().and_then(Option::as_mut)
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take().flatten()
    }
}

impl<T: Entity> RelationSlot for HasOne<T> {
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

impl<T> Default for HasOne<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: fmt::Debug> fmt::Debug for HasOne<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => fmt::Debug::fmt(value, fmt),
            None => fmt.write_str("<not loaded>"),
        }
    }
}
