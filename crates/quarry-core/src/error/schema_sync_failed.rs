use super::Error;

/// Error when a schema synchronization step fails.
///
/// Identifies the table being synchronized and the statement that failed.
/// The driver error that caused it is kept as the cause.
#[derive(Debug)]
pub(super) struct SchemaSyncFailed {
    table: Box<str>,
    step: Box<str>,
}

impl std::error::Error for SchemaSyncFailed {}

impl core::fmt::Display for SchemaSyncFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "schema sync failed on table `{}` at `{}`",
            self.table, self.step
        )
    }
}

impl Error {
    /// Creates a schema sync error for `table` at `step`.
    pub fn schema_sync_failed(table: impl Into<String>, step: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaSyncFailed(SchemaSyncFailed {
            table: table.into().into(),
            step: step.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema sync error.
    pub fn is_schema_sync_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SchemaSyncFailed(_))
    }
}
