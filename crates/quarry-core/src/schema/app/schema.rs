use super::{EntityMetadata, ResolvedRelation};
use super::relation::PivotTable;
use crate::{Error, Result};

use std::collections::HashSet;

/// The set of entities registered with a database handle.
#[derive(Debug, Default, Clone)]
pub struct Schema {
    pub entities: Vec<&'static EntityMetadata>,
}

impl Schema {
    pub fn new(entities: Vec<&'static EntityMetadata>) -> Schema {
        Schema { entities }
    }

    pub fn entity(&self, name: &str) -> Option<&'static EntityMetadata> {
        self.entities.iter().copied().find(|e| e.name == name)
    }

    /// Rejects duplicate entity or table names and verifies every entity.
    pub fn verify(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut tables = HashSet::new();

        for entity in &self.entities {
            if !names.insert(entity.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate entity name `{}`",
                    entity.name
                )));
            }

            if !tables.insert(entity.table.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate table name `{}` (entity `{}`)",
                    entity.table, entity.name
                )));
            }

            entity.verify()?;
        }

        Ok(())
    }

    /// Pivot tables of every many-to-many relationship, deduplicated by
    /// table name, in discovery order.
    pub fn pivot_tables(&self) -> Result<Vec<PivotTable>> {
        let mut seen = HashSet::new();
        let mut pivots = vec![];

        for entity in &self.entities {
            for property in entity.relationships.keys() {
                if let ResolvedRelation::BelongsToMany(rel) = entity.resolve_relation(property)? {
                    if seen.insert(rel.pivot.table.clone()) {
                        pivots.push(rel.pivot);
                    }
                }
            }
        }

        Ok(pivots)
    }
}
