use super::{Comma, Formatter, Params, ToSql};

use crate::stmt::{ClauseKind, Query};

impl ToSql for &ClauseKind {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            ClauseKind::Basic { column, op, value } => {
                fmt!(f, column " " op.as_str() " " value)
            }
            ClauseKind::Between {
                column,
                low,
                high,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                fmt!(f, column " " not "BETWEEN " low " AND " high)
            }
            ClauseKind::In { values, negated, .. } if values.is_empty() => {
                // Nothing is in an empty list
                fmt!(f, if *negated { "1 = 1" } else { "1 = 0" })
            }
            ClauseKind::In {
                column,
                values,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                fmt!(f, column " " not "IN (" Comma(values.iter()) ")")
            }
            ClauseKind::IsNull { column, negated } => {
                let not = if *negated { "NOT " } else { "" };
                fmt!(f, column " IS " not "NULL")
            }
            ClauseKind::Like {
                column,
                pattern,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                fmt!(f, column " " not "LIKE " pattern)
            }
            ClauseKind::SubSelect { column, op, query } => {
                let query: &Query = query;
                fmt!(f, column " " op.as_str() " (" query ")")
            }
            ClauseKind::Raw(raw) => fmt!(f, raw),
        }
    }
}
