use super::relation::{
    BelongsTo, BelongsToMany, HasMany, HasOne, PivotTable, ResolvedBelongsTo,
    ResolvedBelongsToMany, ResolvedHas,
};
use super::{ColumnField, RelationshipField, ResolvedRelation};
use crate::schema::{foreign_key_name, name::default_table_name, pivot_table_name};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Lazily resolved reference to another entity's metadata.
///
/// Relationship declarations store a function pointer instead of the
/// metadata itself, so two entities may reference each other regardless of
/// the order their metadata is built in.
#[derive(Clone, Copy)]
pub struct EntityRef(fn() -> &'static EntityMetadata);

impl EntityRef {
    pub const fn new(thunk: fn() -> &'static EntityMetadata) -> EntityRef {
        EntityRef(thunk)
    }

    pub fn get(&self) -> &'static EntityMetadata {
        (self.0)()
    }
}

impl core::fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "EntityRef({})", self.get().name)
    }
}

/// Table, columns and relationships of one entity type.
///
/// Built once per type and cached for the life of the process.
#[derive(Debug, Clone)]
pub struct EntityMetadata {
    /// Entity name, e.g. `User`
    pub name: String,

    pub table: String,

    /// Columns keyed by property name
    pub columns: IndexMap<String, ColumnField>,

    /// Relationships keyed by property name
    pub relationships: IndexMap<String, RelationshipField>,
}

#[derive(Debug)]
pub struct EntityMetadataBuilder {
    metadata: EntityMetadata,
}

impl EntityMetadata {
    pub fn builder(name: impl Into<String>) -> EntityMetadataBuilder {
        let name = name.into();
        EntityMetadataBuilder {
            metadata: EntityMetadata {
                table: default_table_name(&name),
                name,
                columns: IndexMap::new(),
                relationships: IndexMap::new(),
            },
        }
    }

    /// Returns the primary key property and its field.
    pub fn primary_key(&self) -> Option<(&str, &ColumnField)> {
        self.columns
            .iter()
            .find(|(_, field)| field.primary_key)
            .map(|(name, field)| (name.as_str(), field))
    }

    pub fn primary_key_column(&self) -> Result<&str> {
        match self.primary_key() {
            Some((_, field)) => Ok(&field.column_name),
            None => Err(Error::invalid_schema(format!(
                "entity `{}` has no primary key",
                self.name
            ))),
        }
    }

    pub fn column(&self, property: &str) -> Option<&ColumnField> {
        self.columns.get(property)
    }

    /// Looks up a column field by its database column name.
    pub fn column_by_name(&self, column: &str) -> Option<&ColumnField> {
        self.columns
            .values()
            .find(|field| field.column_name == column)
    }

    pub fn created_at_column(&self) -> Option<&str> {
        self.columns
            .values()
            .find(|field| field.created_at)
            .map(|field| field.column_name.as_str())
    }

    pub fn updated_at_column(&self) -> Option<&str> {
        self.columns
            .values()
            .find(|field| field.updated_at)
            .map(|field| field.column_name.as_str())
    }

    pub fn relationship(&self, property: &str) -> Result<&RelationshipField> {
        self.relationships
            .get(property)
            .ok_or_else(|| Error::unknown_relation(&self.name, property))
    }

    /// Resolves the key columns of relationship `property`.
    ///
    /// The inverse property must exist on the target, either as a
    /// relationship or as a column; otherwise the metadata is rejected.
    pub fn resolve_relation(&self, property: &str) -> Result<ResolvedRelation> {
        let field = self.relationship(property)?;
        let target = field.target().get();

        let inverse = field.inverse();
        let inverse_rel = target.relationships.get(inverse);
        let inverse_col = target.columns.get(inverse);

        if inverse_rel.is_none() && inverse_col.is_none() {
            return Err(Error::invalid_schema(format!(
                "`{}.{}` names inverse `{}`, which is neither a relationship nor a column of `{}`",
                self.name, property, inverse, target.name
            )));
        }

        Ok(match field {
            RelationshipField::HasOne(_) | RelationshipField::HasMany(_) => {
                let owner_key = self.primary_key_column()?.to_string();

                let foreign_key = if let Some(RelationshipField::BelongsTo(rel)) = inverse_rel {
                    match &rel.foreign_key {
                        Some(fk) => fk.clone(),
                        None => foreign_key_name(&self.name, &owner_key),
                    }
                } else if let Some(column) = inverse_col {
                    column.column_name.clone()
                } else {
                    return Err(Error::invalid_schema(format!(
                        "inverse `{}.{}` of `{}.{}` must be a belongs-to relationship",
                        target.name, inverse, self.name, property
                    )));
                };

                let resolved = ResolvedHas {
                    target,
                    owner_key,
                    foreign_key,
                };

                if matches!(field, RelationshipField::HasOne(_)) {
                    ResolvedRelation::HasOne(resolved)
                } else {
                    ResolvedRelation::HasMany(resolved)
                }
            }
            RelationshipField::BelongsTo(rel) => {
                let related_key = target.primary_key_column()?.to_string();
                let foreign_key = match &rel.foreign_key {
                    Some(fk) => fk.clone(),
                    None => foreign_key_name(&target.name, &related_key),
                };

                ResolvedRelation::BelongsTo(ResolvedBelongsTo {
                    target,
                    foreign_key,
                    related_key,
                })
            }
            RelationshipField::BelongsToMany(rel) => {
                let owner_key = self.primary_key_column()?.to_string();
                let related_key = target.primary_key_column()?.to_string();
                let pair = inverse_rel.and_then(RelationshipField::as_belongs_to_many);

                // Overrides declared on either side apply to both.
                let table = rel
                    .pivot_table
                    .clone()
                    .or_else(|| pair.and_then(|pair| pair.pivot_table.clone()))
                    .unwrap_or_else(|| pivot_table_name(&self.table, &target.table));
                let parent_key = rel
                    .parent_key
                    .clone()
                    .or_else(|| pair.and_then(|pair| pair.related_key.clone()))
                    .unwrap_or_else(|| foreign_key_name(&self.name, &owner_key));
                let pivot_related_key = rel
                    .related_key
                    .clone()
                    .or_else(|| pair.and_then(|pair| pair.parent_key.clone()))
                    .unwrap_or_else(|| foreign_key_name(&target.name, &related_key));

                ResolvedRelation::BelongsToMany(ResolvedBelongsToMany {
                    target,
                    owner_key,
                    related_key,
                    pivot: PivotTable {
                        table,
                        parent_key,
                        related_key: pivot_related_key,
                    },
                })
            }
        })
    }

    /// Checks the primary key and resolves every relationship.
    pub fn verify(&self) -> Result<()> {
        let primary_keys = self.columns.values().filter(|f| f.primary_key).count();
        if primary_keys > 1 {
            return Err(Error::invalid_schema(format!(
                "entity `{}` declares {} primary keys; only one is supported",
                self.name, primary_keys
            )));
        }

        for property in self.relationships.keys() {
            self.resolve_relation(property)?;
        }

        Ok(())
    }
}

impl EntityMetadataBuilder {
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.metadata.table = table.into();
        self
    }

    pub fn column(mut self, property: impl Into<String>, mut field: ColumnField) -> Self {
        let property = property.into();
        if field.column_name.is_empty() {
            field.column_name = property.clone();
        }
        self.metadata.columns.insert(property, field);
        self
    }

    pub fn relationship(
        mut self,
        property: impl Into<String>,
        field: impl Into<RelationshipField>,
    ) -> Self {
        self.metadata
            .relationships
            .insert(property.into(), field.into());
        self
    }

    pub fn has_one(self, property: impl Into<String>, target: EntityRef, inverse: &str) -> Self {
        self.relationship(
            property,
            HasOne {
                target,
                inverse: inverse.to_string(),
            },
        )
    }

    pub fn has_many(self, property: impl Into<String>, target: EntityRef, inverse: &str) -> Self {
        self.relationship(
            property,
            HasMany {
                target,
                inverse: inverse.to_string(),
            },
        )
    }

    pub fn belongs_to(
        self,
        property: impl Into<String>,
        target: EntityRef,
        inverse: &str,
    ) -> Self {
        self.relationship(
            property,
            BelongsTo {
                target,
                inverse: inverse.to_string(),
                foreign_key: None,
            },
        )
    }

    pub fn belongs_to_many(
        self,
        property: impl Into<String>,
        target: EntityRef,
        inverse: &str,
    ) -> Self {
        self.relationship(
            property,
            BelongsToMany {
                target,
                inverse: inverse.to_string(),
                pivot_table: None,
                parent_key: None,
                related_key: None,
            },
        )
    }

    pub fn build(self) -> EntityMetadata {
        self.metadata
    }
}
