use super::EntityRef;

/// Many-to-many through a pivot table holding one foreign key per side.
#[derive(Debug, Clone)]
pub struct BelongsToMany {
    pub target: EntityRef,

    /// The `BelongsToMany` on the target that pairs with this
    pub inverse: String,

    /// Defaults to both table names sorted and joined by `_`.
    pub pivot_table: Option<String>,

    /// Pivot column referencing this entity
    pub parent_key: Option<String>,

    /// Pivot column referencing the target
    pub related_key: Option<String>,
}
