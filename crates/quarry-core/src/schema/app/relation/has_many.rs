use super::EntityRef;

#[derive(Debug, Clone)]
pub struct HasMany {
    /// Associated entity
    pub target: EntityRef,

    /// The `BelongsTo` (or foreign-key column) on the target that pairs with this
    pub inverse: String,
}
