/// A hashable key extracted from a [`Value`](super::Value).
///
/// Used to group eager-loaded rows by owner and to compare pivot keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl From<i64> for Key {
    fn from(src: i64) -> Self {
        Self::Int(src)
    }
}

impl From<i32> for Key {
    fn from(src: i32) -> Self {
        Self::Int(src.into())
    }
}

impl From<&str> for Key {
    fn from(src: &str) -> Self {
        Self::Str(src.to_string())
    }
}

impl From<String> for Key {
    fn from(src: String) -> Self {
        Self::Str(src)
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}
