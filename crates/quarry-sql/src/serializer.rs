#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

mod verify;

// Fragment serializers
mod clause;
mod column_def;
mod query;
mod statement;
mod value;

use crate::stmt::Statement;

use quarry_core::{stmt::Value, Result};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

/// Rendered SQL text and the values bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub sql: String,
    pub bindings: Vec<Value>,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    /// Renders `stmt`, pushing bound values to `params` in the order their
    /// placeholders appear.
    ///
    /// Rendering is deterministic: the same statement always yields the same
    /// text and the same parameter order.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> Result<String> {
        verify::verify(stmt)?;

        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        Ok(ret)
    }

    /// Renders `stmt` and collects its bindings.
    pub fn compile(&self, stmt: impl Into<Statement>) -> Result<Compiled> {
        let mut bindings = vec![];
        let sql = self.serialize(&stmt.into(), &mut bindings)?;
        Ok(Compiled { sql, bindings })
    }

    pub fn is_sqlite(&self) -> bool {
        matches!(self.flavor, Flavor::Sqlite)
    }

    pub fn is_mysql(&self) -> bool {
        matches!(self.flavor, Flavor::Mysql)
    }

    /// Quotes an identifier the way this flavor does.
    pub fn ident(&self, name: &str) -> String {
        let mut dst = String::new();
        let mut params = Vec::<Value>::new();
        let mut fmt = Formatter {
            serializer: self,
            dst: &mut dst,
            params: &mut params,
        };
        Ident(name).to_sql(&mut fmt);
        dst
    }
}
