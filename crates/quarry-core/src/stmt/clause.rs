use super::{BinaryOp, Operand, Query, Raw, Value};

/// One `WHERE` condition plus the connector joining it to the previous one.
///
/// The connector on the first clause of a query is not rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub connector: Connector,
    pub kind: ClauseKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClauseKind {
    /// `<column> <op> <value>`
    Basic {
        column: String,
        op: BinaryOp,
        value: Operand,
    },

    /// `<column> [NOT] BETWEEN <low> AND <high>`
    Between {
        column: String,
        low: Value,
        high: Value,
        negated: bool,
    },

    /// `<column> [NOT] IN (<values>)`
    In {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },

    /// `<column> IS [NOT] NULL`
    IsNull { column: String, negated: bool },

    /// `<column> [NOT] LIKE <pattern>`
    Like {
        column: String,
        pattern: Value,
        negated: bool,
    },

    /// `<column> <op> (<subquery>)`
    SubSelect {
        column: String,
        op: SubSelectOp,
        query: Box<Query>,
    },

    /// A literal fragment
    Raw(Raw),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubSelectOp {
    Cmp(BinaryOp),
    In,
    NotIn,
}

impl Connector {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl SubSelectOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cmp(op) => op.as_str(),
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

impl Clause {
    pub fn new(connector: Connector, kind: ClauseKind) -> Clause {
        Clause { connector, kind }
    }

    /// Builds a comparison clause. A sub-query operand becomes a
    /// [`ClauseKind::SubSelect`].
    pub fn compare(
        connector: Connector,
        column: impl Into<String>,
        op: BinaryOp,
        value: Operand,
    ) -> Clause {
        let column = column.into();
        let kind = match value {
            Operand::Query(query) => ClauseKind::SubSelect {
                column,
                op: SubSelectOp::Cmp(op),
                query,
            },
            value => ClauseKind::Basic { column, op, value },
        };
        Clause { connector, kind }
    }
}
