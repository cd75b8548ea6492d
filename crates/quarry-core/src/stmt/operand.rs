use super::{Key, Query, Raw, Value};

use chrono::{DateTime, NaiveDateTime, Utc};

/// The right-hand side of a comparison or assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Bound to a `?` placeholder
    Value(Value),

    /// Emitted verbatim with its own bindings
    Raw(Raw),

    /// A nested select whose bindings are spliced in at this position
    Query(Box<Query>),
}

/// Types accepted wherever a clause or assignment takes a value.
pub trait IntoOperand {
    fn into_operand(self) -> Operand;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

impl IntoOperand for Raw {
    fn into_operand(self) -> Operand {
        Operand::Raw(self)
    }
}

impl IntoOperand for Query {
    fn into_operand(self) -> Operand {
        Operand::Query(Box::new(self))
    }
}

macro_rules! impl_into_operand {
    ( $( $ty:ty ),* ) => {
        $(
            impl IntoOperand for $ty {
                fn into_operand(self) -> Operand {
                    Operand::Value(self.into())
                }
            }
        )*
    };
}

impl_into_operand!(
    Value,
    Key,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    String,
    &String,
    &str,
    Vec<u8>,
    NaiveDateTime,
    DateTime<Utc>
);

impl<T> IntoOperand for Option<T>
where
    Value: From<T>,
{
    fn into_operand(self) -> Operand {
        Operand::Value(self.into())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Operand {
        Operand::Value(value)
    }
}
