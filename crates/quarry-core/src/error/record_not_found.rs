use super::Error;
use crate::stmt::Value;

/// Error when a record lookup (by query or key) returns no results.
///
/// Carries the statement that came back empty so callers can report it.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    sql: Option<Box<str>>,
    bindings: Vec<Value>,
}

impl RecordNotFoundError {
    pub(super) fn statement(&self) -> Option<(&str, &[Value])> {
        self.sql.as_deref().map(|sql| (sql, &self.bindings[..]))
    }
}

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("record not found")?;
        if let Some(ref sql) = self.sql {
            write!(f, ": {} {}", sql, super::statement::DisplayBindings(&self.bindings))?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a record-not-found error for the given statement.
    pub fn record_not_found(sql: impl Into<String>, bindings: Vec<Value>) -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError {
            sql: Some(sql.into().into()),
            bindings,
        }))
    }

    /// Returns `true` if this error is a record-not-found error.
    pub fn is_record_not_found(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), super::ErrorKind::RecordNotFound(_)))
    }
}
