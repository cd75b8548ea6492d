use super::{IntoOperand, Operand, Row};

use indexmap::IndexMap;

/// Column assignments for one inserted row or an update's `SET` list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments {
    entries: IndexMap<String, Operand>,
}

impl Assignments {
    pub fn new() -> Assignments {
        Assignments::default()
    }

    pub fn set(mut self, column: impl Into<String>, value: impl IntoOperand) -> Assignments {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl IntoOperand) {
        self.entries.insert(column.into(), value.into_operand());
    }

    pub fn get(&self, column: &str) -> Option<&Operand> {
        self.entries.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operand)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Row> for Assignments {
    fn from(row: Row) -> Assignments {
        Assignments {
            entries: row
                .into_iter()
                .map(|(column, value)| (column, Operand::Value(value)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: IntoOperand> FromIterator<(K, V)> for Assignments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Assignments {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_operand()))
                .collect(),
        }
    }
}
