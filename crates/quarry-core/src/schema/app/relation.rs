mod belongs_to;
pub use belongs_to::BelongsTo;

mod belongs_to_many;
pub use belongs_to_many::BelongsToMany;

mod has_many;
pub use has_many::HasMany;

mod has_one;
pub use has_one::HasOne;

mod resolved;
pub use resolved::{PivotTable, ResolvedBelongsTo, ResolvedBelongsToMany, ResolvedHas, ResolvedRelation};

use super::EntityRef;

/// A relationship declared on an entity.
#[derive(Debug, Clone)]
pub enum RelationshipField {
    HasOne(HasOne),
    HasMany(HasMany),
    BelongsTo(BelongsTo),
    BelongsToMany(BelongsToMany),
}

impl RelationshipField {
    pub fn target(&self) -> EntityRef {
        match self {
            Self::HasOne(rel) => rel.target,
            Self::HasMany(rel) => rel.target,
            Self::BelongsTo(rel) => rel.target,
            Self::BelongsToMany(rel) => rel.target,
        }
    }

    /// Property on the target entity that points back at the owner.
    pub fn inverse(&self) -> &str {
        match self {
            Self::HasOne(rel) => &rel.inverse,
            Self::HasMany(rel) => &rel.inverse,
            Self::BelongsTo(rel) => &rel.inverse,
            Self::BelongsToMany(rel) => &rel.inverse,
        }
    }

    pub fn is_belongs_to(&self) -> bool {
        matches!(self, Self::BelongsTo(_))
    }

    pub fn as_belongs_to(&self) -> Option<&BelongsTo> {
        match self {
            Self::BelongsTo(rel) => Some(rel),
            _ => None,
        }
    }

    pub fn as_belongs_to_many(&self) -> Option<&BelongsToMany> {
        match self {
            Self::BelongsToMany(rel) => Some(rel),
            _ => None,
        }
    }
}

impl From<HasOne> for RelationshipField {
    fn from(value: HasOne) -> Self {
        Self::HasOne(value)
    }
}

impl From<HasMany> for RelationshipField {
    fn from(value: HasMany) -> Self {
        Self::HasMany(value)
    }
}

impl From<BelongsTo> for RelationshipField {
    fn from(value: BelongsTo) -> Self {
        Self::BelongsTo(value)
    }
}

impl From<BelongsToMany> for RelationshipField {
    fn from(value: BelongsToMany) -> Self {
        Self::BelongsToMany(value)
    }
}
