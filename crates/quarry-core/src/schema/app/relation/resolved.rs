use super::super::EntityMetadata;

/// A relationship with every key column worked out.
#[derive(Debug, Clone)]
pub enum ResolvedRelation {
    HasOne(ResolvedHas),
    HasMany(ResolvedHas),
    BelongsTo(ResolvedBelongsTo),
    BelongsToMany(ResolvedBelongsToMany),
}

/// `HasOne` / `HasMany`: related rows carry `foreign_key = owner.owner_key`.
#[derive(Debug, Clone)]
pub struct ResolvedHas {
    pub target: &'static EntityMetadata,

    /// Owner's primary key column
    pub owner_key: String,

    /// Column on the target table
    pub foreign_key: String,
}

/// `BelongsTo`: the owner carries `foreign_key = target.related_key`.
#[derive(Debug, Clone)]
pub struct ResolvedBelongsTo {
    pub target: &'static EntityMetadata,

    /// Column on the owner's table
    pub foreign_key: String,

    /// Target's primary key column
    pub related_key: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedBelongsToMany {
    pub target: &'static EntityMetadata,

    /// Owner's primary key column
    pub owner_key: String,

    /// Target's primary key column
    pub related_key: String,

    pub pivot: PivotTable,
}

/// The join table backing a many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotTable {
    pub table: String,

    /// Column holding the owner's key
    pub parent_key: String,

    /// Column holding the target's key
    pub related_key: String,
}

impl ResolvedRelation {
    pub fn target(&self) -> &'static EntityMetadata {
        match self {
            Self::HasOne(rel) | Self::HasMany(rel) => rel.target,
            Self::BelongsTo(rel) => rel.target,
            Self::BelongsToMany(rel) => rel.target,
        }
    }

    /// True when the relationship loads a collection.
    pub fn is_many(&self) -> bool {
        matches!(self, Self::HasMany(_) | Self::BelongsToMany(_))
    }

    /// Column on the owner whose value is used to look up related rows.
    pub fn owner_column(&self) -> &str {
        match self {
            Self::HasOne(rel) | Self::HasMany(rel) => &rel.owner_key,
            Self::BelongsTo(rel) => &rel.foreign_key,
            Self::BelongsToMany(rel) => &rel.owner_key,
        }
    }
}

impl PivotTable {
    /// Pivot columns sorted by name.
    pub fn columns(&self) -> [&str; 2] {
        let (a, b) = (self.parent_key.as_str(), self.related_key.as_str());
        if a <= b {
            [a, b]
        } else {
            [b, a]
        }
    }
}
