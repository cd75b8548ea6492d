use super::Raw;

/// A projected column: either a plain column name or a raw expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRef {
    Name(String),
    Raw(Raw),
}

impl From<&str> for ColumnRef {
    fn from(src: &str) -> Self {
        Self::Name(src.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(src: String) -> Self {
        Self::Name(src)
    }
}

impl From<Raw> for ColumnRef {
    fn from(src: Raw) -> Self {
        Self::Raw(src)
    }
}
