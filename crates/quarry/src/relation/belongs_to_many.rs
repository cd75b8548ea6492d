use super::{hydrate_persisted, RelationSlot, PIVOT_PREFIX};
use crate::Entity;

use quarry_core::{stmt::Row, Result};

use std::fmt;

/// Entities linked to the owner through a pivot table.
///
/// Each loaded entity keeps the pivot columns it was joined through; they
/// are not part of the entity's own attributes.
pub struct BelongsToMany<T> {
    values: Option<Vec<T>>,
    pivots: Vec<Row>,
}

impl<T: Entity> BelongsToMany<T> {
    pub fn get(&self) -> Option<&[T]> {
        self.values.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter().flatten()
    }

    /// Entities paired with the pivot row each was loaded through.
    pub fn iter_with_pivot(&self) -> impl Iterator<Item = (&T, &Row)> {
        self.iter().zip(self.pivots.iter())
    }
}

impl<T: Entity> RelationSlot for BelongsToMany<T> {
    fn fill(&mut self, rows: Vec<Row>) -> Result<()> {
        let mut values = Vec::with_capacity(rows.len());
        let mut pivots = Vec::with_capacity(rows.len());

        for row in rows {
            let (pivot, attributes): (Row, Row) = row
                .into_iter()
                .partition(|(column, _)| column.starts_with(PIVOT_PREFIX));

            pivots.push(
                pivot
                    .into_iter()
                    .map(|(column, value)| (column[PIVOT_PREFIX.len()..].to_string(), value))
                    .collect(),
            );
            values.push(hydrate_persisted(attributes)?);
        }

        self.values = Some(values);
        self.pivots = pivots;
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.values.is_some()
    }

    fn unload(&mut self) {
        self.values = None;
        self.pivots.clear();
    }
}

impl<T> Default for BelongsToMany<T> {
    fn default() -> Self {
        Self {
            values: None,
            pivots: vec![],
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BelongsToMany<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.values {
            Some(values) => fmt.debug_list().entries(values).finish(),
            None => fmt.write_str("<not loaded>"),
        }
    }
}
