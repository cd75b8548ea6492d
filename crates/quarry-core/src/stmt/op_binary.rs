use crate::{Error, Result};

/// Comparison operators accepted by `where_op` and join conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    pub fn parse(src: &str) -> Result<BinaryOp> {
        Ok(match src.trim() {
            "=" | "==" => Self::Eq,
            "<>" | "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            other => {
                return Err(Error::invalid_statement(format!(
                    "unsupported comparison operator `{other}`"
                )))
            }
        })
    }
}

impl core::str::FromStr for BinaryOp {
    type Err = Error;

    fn from_str(src: &str) -> Result<BinaryOp> {
        BinaryOp::parse(src)
    }
}

impl core::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
