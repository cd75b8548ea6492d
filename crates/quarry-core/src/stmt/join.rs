use super::BinaryOp;

/// A `JOIN` against another table.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,

    /// `None` only for cross joins.
    pub on: Option<JoinOn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Cross,
}

/// `ON <left> <op> <right>`; both sides are column expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOn {
    pub left: String,
    pub op: BinaryOp,
    pub right: String,
}

impl JoinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Cross => "CROSS",
        }
    }
}
