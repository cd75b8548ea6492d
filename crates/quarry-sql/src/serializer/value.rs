use super::{Formatter, Params, ToSql};

use crate::stmt::{Operand, Query, Raw, Value};

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}

impl ToSql for &Raw {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(&self.sql);
        for value in &self.bindings {
            f.params.push(value);
        }
    }
}

impl ToSql for &Operand {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Operand::Value(value) => fmt!(f, value),
            Operand::Raw(raw) => fmt!(f, raw),
            Operand::Query(query) => {
                let query: &Query = query;
                fmt!(f, "(" query ")")
            }
        }
    }
}
