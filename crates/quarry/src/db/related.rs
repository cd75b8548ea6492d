use super::Db;
use crate::{
    entity::relation_slot,
    relation::{loader, Pivot},
    Entity,
};

use quarry_core::{schema::app::ResolvedRelation, stmt::Value, Error, Result};

impl Db {
    /// Loads relationship `property` of a single entity.
    ///
    /// Does nothing if the container is already loaded; see [`Db::reload`].
    pub async fn load<E: Entity>(&self, entity: &mut E, property: &str) -> Result<()> {
        loader::load(self, std::slice::from_mut(entity), property, false).await
    }

    /// Loads relationship `property` again, even if already loaded.
    pub async fn reload<E: Entity>(&self, entity: &mut E, property: &str) -> Result<()> {
        loader::load(self, std::slice::from_mut(entity), property, true).await
    }

    /// Loads relationship `property` for every entity in `entities` with a
    /// single query.
    pub async fn load_many<E: Entity>(&self, entities: &mut [E], property: &str) -> Result<()> {
        loader::load(self, entities, property, false).await
    }

    /// Counts related rows per entity with a single grouped query, attaching
    /// the result as `<property>Count`.
    pub async fn load_count<E: Entity>(&self, entities: &mut [E], property: &str) -> Result<()> {
        loader::load_count(self, entities, property).await
    }

    /// Saves `child` as related to `owner` through `property`.
    ///
    /// For has-one and has-many relationships the child's foreign key is set
    /// to the owner's key. For many-to-many relationships the child is saved
    /// and then attached through the pivot table.
    pub async fn save_related<E: Entity, R: Entity>(
        &self,
        owner: &E,
        property: &str,
        child: &mut R,
    ) -> Result<()> {
        let relation = resolve_target::<E, R>(property)?;
        persisted_key(owner)?;

        match relation {
            ResolvedRelation::HasOne(rel) | ResolvedRelation::HasMany(rel) => {
                let owner_value = owner.attribute(&rel.owner_key);
                child.set_attribute(&rel.foreign_key, owner_value)?;
                self.save(child).await
            }
            ResolvedRelation::BelongsToMany(_) => {
                self.save(child).await?;
                let key = persisted_key(child)?;
                self.pivot(owner, property)?.add([key]).await?;
                Ok(())
            }
            ResolvedRelation::BelongsTo(_) => Err(Error::invalid_statement(format!(
                "`{}.{property}` is a belongs-to relationship; use `associate`",
                E::metadata().name
            ))),
        }
    }

    /// Points `child`'s belongs-to relationship `property` at `parent` and
    /// fills the container with a copy of it. The child is not saved.
    pub fn associate<E: Entity, R: Entity>(
        &self,
        child: &mut E,
        property: &str,
        parent: &R,
    ) -> Result<()> {
        let ResolvedRelation::BelongsTo(rel) = resolve_target::<E, R>(property)? else {
            return Err(Error::invalid_statement(format!(
                "`{}.{property}` is not a belongs-to relationship",
                E::metadata().name
            )));
        };

        persisted_key(parent)?;
        let parent_value = parent.attribute(&rel.related_key);
        child.set_attribute(&rel.foreign_key, parent_value)?;

        relation_slot(child, property)?.fill(vec![parent.attributes()])
    }

    /// Pivot operations for many-to-many relationship `property` of `owner`.
    pub fn pivot<E: Entity>(&self, owner: &E, property: &str) -> Result<Pivot<'_>> {
        let ResolvedRelation::BelongsToMany(rel) = E::metadata().resolve_relation(property)? else {
            return Err(Error::invalid_statement(format!(
                "`{}.{property}` is not a many-to-many relationship",
                E::metadata().name
            )));
        };

        let owner_key = persisted_key(owner)?;
        Ok(Pivot::new(self, rel.pivot, owner_key))
    }
}

/// Resolves `property` on `E` and checks that it targets `R`.
fn resolve_target<E: Entity, R: Entity>(property: &str) -> Result<ResolvedRelation> {
    let relation = E::metadata().resolve_relation(property)?;
    let target = relation.target();

    if !std::ptr::eq(target, R::metadata()) {
        return Err(Error::invalid_statement(format!(
            "`{}.{property}` relates to `{}`, not `{}`",
            E::metadata().name,
            target.name,
            R::metadata().name
        )));
    }

    Ok(relation)
}

/// The primary key of an entity that must already be saved.
fn persisted_key<E: Entity>(entity: &E) -> Result<Value> {
    let key = entity.primary_key()?;
    if !entity.exists() || key.is_null() {
        return Err(Error::invalid_statement(format!(
            "`{}` must be saved first",
            E::metadata().name
        )));
    }
    Ok(key)
}
