use super::{hydrate_persisted, RelationSlot};
use crate::Entity;

use quarry_core::{stmt::Row, Result};

use std::fmt;

pub struct HasMany<T> {
    values: Option<Vec<T>>,
}

impl<T: Entity> HasMany<T> {
    /// Loaded entities, `None` until the relation is loaded.
    pub fn get(&self) -> Option<&[T]> {
        self.values.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut Vec<T>> {
        self.values.as_mut()
    }

    /// Number of loaded entities; zero when not loaded.
    pub fn len(&self) -> usize {
        self.values.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter().flatten()
    }
}

impl<T: Entity> RelationSlot for HasMany<T> {
    fn fill(&mut self, rows: Vec<Row>) -> Result<()> {
        let values = rows
            .into_iter()
            .map(hydrate_persisted)
            .collect::<Result<Vec<_>>>()?;
        self.values = Some(values);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.values.is_some()
    }

    fn unload(&mut self) {
        self.values = None;
    }
}

impl<T> Default for HasMany<T> {
    fn default() -> Self {
        Self { values: None }
    }
}

impl<T: fmt::Debug> fmt::Debug for HasMany<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.values {
            Some(values) => fmt.debug_list().entries(values).finish(),
            None => fmt.write_str("<not loaded>"),
        }
    }
}
