use crate::Db;

use quarry_core::{
    schema::app::PivotTable,
    stmt::{Key, Query, Row, Value},
    Error, Result,
};

use std::collections::BTreeSet;

/// Membership operations on a many-to-many relationship.
///
/// Only the pivot table is touched; related entities are neither read nor
/// written. Obtained from [`Db::pivot`].
#[derive(Debug)]
pub struct Pivot<'a> {
    db: &'a Db,
    pivot: PivotTable,
    owner_key: Value,
}

/// Keys attached and detached by a [`Pivot`] operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PivotChanges {
    pub attached: Vec<Key>,
    pub detached: Vec<Key>,
}

impl<'a> Pivot<'a> {
    pub(crate) fn new(db: &'a Db, pivot: PivotTable, owner_key: Value) -> Pivot<'a> {
        Pivot {
            db,
            pivot,
            owner_key,
        }
    }

    pub fn table(&self) -> &PivotTable {
        &self.pivot
    }

    /// Related keys currently attached, sorted.
    pub async fn keys(&self) -> Result<Vec<Key>> {
        let query = self
            .owned()
            .select([self.pivot.related_key.as_str()]);

        let keys: BTreeSet<Key> = self
            .db
            .fetch(query)
            .await?
            .iter()
            .filter_map(|row| row.get(&self.pivot.related_key))
            .filter_map(Value::to_key)
            .collect();

        Ok(keys.into_iter().collect())
    }

    /// Attaches `keys`, skipping any already attached. Returns the keys
    /// that were inserted.
    pub async fn add<V: Into<Value>>(&self, keys: impl IntoIterator<Item = V>) -> Result<Vec<Key>> {
        let keys = to_keys(keys)?;
        let current: BTreeSet<Key> = self.keys().await?.into_iter().collect();

        let attach: Vec<Key> = keys
            .into_iter()
            .filter(|key| !current.contains(key))
            .collect();

        self.insert(&attach).await?;
        Ok(attach)
    }

    /// Detaches `keys`. Returns the number of pivot rows deleted.
    pub async fn remove<V: Into<Value>>(&self, keys: impl IntoIterator<Item = V>) -> Result<u64> {
        let keys = to_keys(keys)?;
        self.delete(&keys).await
    }

    /// Detaches every related key.
    pub async fn clear(&self) -> Result<u64> {
        self.db.exec(self.owned().delete()).await
    }

    /// Detaches each key that is attached and attaches each one that is not.
    pub async fn toggle<V: Into<Value>>(
        &self,
        keys: impl IntoIterator<Item = V>,
    ) -> Result<PivotChanges> {
        let keys = to_keys(keys)?;
        let current: BTreeSet<Key> = self.keys().await?.into_iter().collect();

        let (detached, attached): (Vec<Key>, Vec<Key>) =
            keys.into_iter().partition(|key| current.contains(key));

        self.delete(&detached).await?;
        self.insert(&attached).await?;

        Ok(PivotChanges { attached, detached })
    }

    /// Makes `keys` the exact set of attached keys, touching only the
    /// difference.
    pub async fn sync<V: Into<Value>>(
        &self,
        keys: impl IntoIterator<Item = V>,
    ) -> Result<PivotChanges> {
        let target: BTreeSet<Key> = to_keys(keys)?.into_iter().collect();
        let current: BTreeSet<Key> = self.keys().await?.into_iter().collect();

        let detached: Vec<Key> = current.difference(&target).cloned().collect();
        let attached: Vec<Key> = target.difference(&current).cloned().collect();

        self.delete(&detached).await?;
        self.insert(&attached).await?;

        Ok(PivotChanges { attached, detached })
    }

    /// Pivot rows belonging to the owner.
    fn owned(&self) -> Query {
        Query::table(&self.pivot.table).where_eq(&self.pivot.parent_key, self.owner_key.clone())
    }

    async fn insert(&self, keys: &[Key]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let rows = keys.iter().map(|key| {
            Row::new()
                .set(&self.pivot.parent_key, self.owner_key.clone())
                .set(&self.pivot.related_key, key.clone())
        });

        self.db
            .exec(Query::table(&self.pivot.table).insert(rows))
            .await?;
        Ok(())
    }

    async fn delete(&self, keys: &[Key]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let keys = keys.iter().cloned().map(Value::from);
        let query = self
            .owned()
            .where_in(&self.pivot.related_key, keys)
            .delete();

        self.db.exec(query).await
    }
}

/// Converts related keys, dropping duplicates but keeping order.
fn to_keys<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Result<Vec<Key>> {
    let mut seen = BTreeSet::new();
    let mut keys = vec![];

    for value in values {
        let value = value.into();
        let Some(key) = value.to_key() else {
            return Err(Error::invalid_statement(format!(
                "{} cannot be used as a related key",
                value.kind_name()
            )));
        };

        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }

    Ok(keys)
}
