use super::EntityRef;

/// The target holds a foreign key pointing at this entity; at most one target
/// row matches.
#[derive(Debug, Clone)]
pub struct HasOne {
    pub target: EntityRef,

    /// The `BelongsTo` (or foreign-key column) on the target that pairs with this
    pub inverse: String,
}
