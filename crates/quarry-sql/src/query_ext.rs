use crate::{Compiled, Serializer};

use quarry_core::{
    stmt::{Query, Value},
    Result,
};

/// Renders a query without a connection, in the MySQL dialect.
///
/// ```
/// use quarry_sql::{stmt::Query, QueryExt};
///
/// let query = Query::table("users").where_eq("name", "John").or_where("age", 21);
/// assert_eq!(query.to_sql().unwrap(), "SELECT * FROM `users` WHERE name = ? OR age = ?");
/// ```
pub trait QueryExt {
    fn compile(&self) -> Result<Compiled>;

    fn to_sql(&self) -> Result<String> {
        Ok(self.compile()?.sql)
    }

    /// Values bound to the placeholders of [`QueryExt::to_sql`], in order.
    fn bindings(&self) -> Result<Vec<Value>> {
        Ok(self.compile()?.bindings)
    }
}

impl QueryExt for Query {
    fn compile(&self) -> Result<Compiled> {
        Serializer::mysql().compile(self.clone())
    }
}
