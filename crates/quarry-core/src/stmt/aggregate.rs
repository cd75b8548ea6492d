/// An aggregate projection, rendered as `<FUNC>(<cols or *>) AS aggregate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub func: AggregateFunc,

    /// Empty renders as `*`.
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Count,
    Max,
    Min,
    Sum,
    Avg,
}

impl Aggregate {
    /// Alias the aggregate value is read back through.
    pub const ALIAS: &'static str = "aggregate";
}

impl AggregateFunc {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
        }
    }
}
