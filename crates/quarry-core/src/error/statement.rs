use super::Error;
use crate::stmt::Value;

/// Context attached to an error raised while executing a statement.
#[derive(Debug)]
pub(super) struct StatementError {
    pub(super) sql: Box<str>,
    pub(super) bindings: Vec<Value>,
}

impl std::error::Error for StatementError {}

impl core::fmt::Display for StatementError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to execute `{}`", self.sql)?;
        if !self.bindings.is_empty() {
            write!(f, " {}", DisplayBindings(&self.bindings))?;
        }
        Ok(())
    }
}

pub(super) struct DisplayBindings<'a>(pub(super) &'a [Value]);

impl core::fmt::Display for DisplayBindings<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            core::fmt::Display::fmt(value, f)?;
        }
        f.write_str("]")
    }
}

impl Error {
    /// Attaches the SQL text and bindings of the failing statement.
    pub fn with_sql(self, sql: &str, bindings: &[Value]) -> Error {
        self.context(Error::from(super::ErrorKind::Statement(StatementError {
            sql: sql.into(),
            bindings: bindings.to_vec(),
        })))
    }
}
