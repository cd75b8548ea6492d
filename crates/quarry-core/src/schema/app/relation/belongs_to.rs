use super::EntityRef;

/// This entity holds a foreign key pointing at the target's primary key.
#[derive(Debug, Clone)]
pub struct BelongsTo {
    pub target: EntityRef,

    /// The `HasOne`/`HasMany` on the target that pairs with this
    pub inverse: String,

    /// Foreign-key column on this entity. Defaults to
    /// [`foreign_key_name`](crate::schema::foreign_key_name) of the target.
    pub foreign_key: Option<String>,
}
