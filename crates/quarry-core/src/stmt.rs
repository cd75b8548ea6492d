mod aggregate;
pub use aggregate::{Aggregate, AggregateFunc};

mod assignments;
pub use assignments::Assignments;

mod clause;
pub use clause::{Clause, ClauseKind, Connector, SubSelectOp};

mod column_ref;
pub use column_ref::ColumnRef;

mod direction;
pub use direction::Direction;

mod from_value;
pub use from_value::FromValue;

mod join;
pub use join::{Join, JoinKind, JoinOn};

mod key;
pub use key::Key;

mod limit;
pub use limit::Limit;

mod op_binary;
pub use op_binary::BinaryOp;

mod operand;
pub use operand::{IntoOperand, Operand};

mod order_by;
pub use order_by::{OrderByExpr, OrderByTarget};

mod query;
pub use query::{Query, StatementKind};

mod raw;
pub use raw::Raw;

mod row;
pub use row::Row;

mod value;
pub use value::{Value, DATETIME_FORMAT};
