use super::{FromValue, Value};
use crate::{err, Result};

use indexmap::IndexMap;
use serde::Serialize;

/// One result row: column names mapped to values, in select order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    pub fn with_capacity(capacity: usize) -> Row {
        Row {
            columns: IndexMap::with_capacity(capacity),
        }
    }

    /// Sets `column` to `value`, keeping its position if already present.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Builder form of [`Row::insert`].
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Row {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Removes `column` and converts it. A missing column reads as null.
    pub fn take<T: FromValue>(&mut self, column: &str) -> Result<T> {
        let value = self.remove(column).unwrap_or_default();
        T::from_value(value).map_err(|e| e.context(err!("column `{column}`")))
    }

    /// Converts a copy of `column` without removing it.
    pub fn read<T: FromValue>(&self, column: &str) -> Result<T> {
        let value = self.get(column).cloned().unwrap_or_default();
        T::from_value(value).map_err(|e| e.context(err!("column `{column}`")))
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.columns.shift_remove(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Row {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (column, value) in iter {
            self.insert(column, value);
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}
