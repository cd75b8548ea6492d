use super::Error;

/// Error when a relationship name does not exist on an entity.
#[derive(Debug)]
pub(super) struct UnknownRelation {
    entity: Box<str>,
    property: Box<str>,
}

impl std::error::Error for UnknownRelation {}

impl core::fmt::Display for UnknownRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown relation: `{}` has no relationship named `{}`",
            self.entity, self.property
        )
    }
}

impl Error {
    pub fn unknown_relation(entity: impl Into<String>, property: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownRelation(UnknownRelation {
            entity: entity.into().into(),
            property: property.into().into(),
        }))
    }

    pub fn is_unknown_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownRelation(_))
    }
}
