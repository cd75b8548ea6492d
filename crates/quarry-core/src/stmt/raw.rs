use super::Value;

/// A literal SQL fragment with its own positional bindings.
///
/// The fragment is emitted verbatim; every `?` in it must have a matching
/// entry in `bindings`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    pub sql: String,
    pub bindings: Vec<Value>,
}

impl Raw {
    pub fn new(sql: impl Into<String>) -> Raw {
        Raw {
            sql: sql.into(),
            bindings: vec![],
        }
    }

    pub fn with_bindings<V: Into<Value>>(
        sql: impl Into<String>,
        bindings: impl IntoIterator<Item = V>,
    ) -> Raw {
        Raw {
            sql: sql.into(),
            bindings: bindings.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for Raw {
    fn from(src: &str) -> Raw {
        Raw::new(src)
    }
}

impl From<String> for Raw {
    fn from(src: String) -> Raw {
        Raw::new(src)
    }
}
