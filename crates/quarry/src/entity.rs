use crate::relation::RelationSlot;

use quarry_core::{
    schema::app::EntityMetadata,
    stmt::{FromValue, Row, Value},
    Error, Result,
};

/// A type mapped to one table.
///
/// Implementations describe their table through [`Entity::metadata`] and
/// convert between rows and instances. Relationship containers are plain
/// fields on the struct, reachable by property name through
/// [`Entity::relation_mut`].
pub trait Entity: Sized + Send + Sync + 'static {
    /// Metadata for this entity type, built once and cached.
    fn metadata() -> &'static EntityMetadata;

    /// Builds an instance from a result row. Relationship containers start
    /// out not loaded.
    fn hydrate(row: Row) -> Result<Self>;

    /// Current column values keyed by column name.
    fn attributes(&self) -> Row;

    /// Overwrites one column value.
    fn set_attribute(&mut self, column: &str, value: Value) -> Result<()>;

    fn state(&self) -> &EntityState;

    fn state_mut(&mut self) -> &mut EntityState;

    /// The relationship container for `property`, if the entity declares one.
    fn relation_mut(&mut self, property: &str) -> Option<&mut dyn RelationSlot> {
        let _ = property;
        None
    }

    /// Value of the primary key column.
    fn primary_key(&self) -> Result<Value> {
        let column = Self::metadata().primary_key_column()?;
        Ok(self.attribute(column))
    }

    /// Value of `column`, null if the entity has no such column.
    fn attribute(&self, column: &str) -> Value {
        self.attributes().remove(column).unwrap_or_default()
    }

    /// True once the instance has been saved or read from the database.
    fn exists(&self) -> bool {
        self.state().exists
    }
}

/// Bookkeeping carried by every entity instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityState {
    /// Set after the first successful save or find
    pub exists: bool,

    /// Synthetic values attached by queries, such as `<relation>Count`
    extra: Row,
}

impl EntityState {
    /// State of an instance read back from the database.
    pub fn persisted() -> EntityState {
        EntityState {
            exists: true,
            extra: Row::new(),
        }
    }

    pub fn extra(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn set_extra(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(name, value);
    }

    /// Count attached by [`crate::EntityQuery::with_count`], zero if the
    /// relation had no rows for this instance.
    pub fn count(&self, relation: &str) -> Result<u64> {
        match self.extra(&format!("{relation}Count")) {
            Some(value) => u64::from_value(value.clone()),
            None => Err(Error::invalid_statement(format!(
                "`{relation}` was not counted; use `with_count(\"{relation}\")`"
            ))),
        }
    }
}

/// Looks up `property`'s container or reports it as unknown.
pub(crate) fn relation_slot<'a, E: Entity>(
    entity: &'a mut E,
    property: &str,
) -> Result<&'a mut dyn RelationSlot> {
    match entity.relation_mut(property) {
        Some(slot) => Ok(slot),
        None => Err(Error::unknown_relation(&E::metadata().name, property)),
    }
}
