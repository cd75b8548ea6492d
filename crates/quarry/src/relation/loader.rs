//! Relationship loading.
//!
//! Loading a relationship for any number of owners issues one query: the
//! distinct owner keys are collected, related rows are fetched with a single
//! key filter, and the result set is grouped by key and handed back to each
//! owner's container.

use super::PIVOT_PREFIX;
use crate::{entity::relation_slot, Db, Entity};

use quarry_core::{
    schema::app::ResolvedRelation,
    stmt::{Aggregate, BinaryOp, Key, Query, Row, Value},
    Result,
};

use std::collections::{HashMap, HashSet};

pub(crate) async fn load<E: Entity>(
    db: &Db,
    owners: &mut [E],
    property: &str,
    force: bool,
) -> Result<()> {
    let relation = E::metadata().resolve_relation(property)?;

    let mut pending = vec![];
    for (index, owner) in owners.iter_mut().enumerate() {
        let slot = relation_slot(owner, property)?;
        if force || !slot.is_loaded() {
            pending.push(index);
        }
    }

    if pending.is_empty() {
        return Ok(());
    }

    let owner_column = relation.owner_column();
    let owner_keys: Vec<Option<Key>> = pending
        .iter()
        .map(|&index| owners[index].attribute(owner_column).to_key())
        .collect();
    let keys = distinct(&owner_keys);

    tracing::debug!(
        entity = %E::metadata().name,
        relation = %property,
        owners = pending.len(),
        keys = keys.len(),
        "load relation"
    );

    let mut groups = if keys.is_empty() {
        HashMap::new()
    } else {
        let (query, group_column) = related_query(db, &relation, keys);
        group_rows(db.fetch(query).await?, &group_column)
    };

    let last_use = last_use(&owner_keys);
    for (position, (&index, key)) in pending.iter().zip(&owner_keys).enumerate() {
        let rows = match key {
            // Several owners may share a key, e.g. articles by the same author.
            Some(key) if last_use.get(key) == Some(&position) => {
                groups.remove(key).unwrap_or_default()
            }
            Some(key) => groups.get(key).cloned().unwrap_or_default(),
            None => vec![],
        };

        relation_slot(&mut owners[index], property)?.fill(rows)?;
    }

    Ok(())
}

pub(crate) async fn load_count<E: Entity>(
    db: &Db,
    owners: &mut [E],
    property: &str,
) -> Result<()> {
    let relation = E::metadata().resolve_relation(property)?;

    let owner_column = relation.owner_column();
    let owner_keys: Vec<Option<Key>> = owners
        .iter()
        .map(|owner| owner.attribute(owner_column).to_key())
        .collect();
    let keys = distinct(&owner_keys);

    tracing::debug!(
        entity = %E::metadata().name,
        relation = %property,
        owners = owners.len(),
        keys = keys.len(),
        "count relation"
    );

    let mut counts = HashMap::new();

    if !keys.is_empty() {
        let (table, column) = match &relation {
            ResolvedRelation::HasOne(rel) | ResolvedRelation::HasMany(rel) => {
                (&rel.target.table, &rel.foreign_key)
            }
            ResolvedRelation::BelongsTo(rel) => (&rel.target.table, &rel.related_key),
            ResolvedRelation::BelongsToMany(rel) => (&rel.pivot.table, &rel.pivot.parent_key),
        };

        let query = filter_keys(Query::table(table), column, keys)
            .group_by([column])
            .count();

        for mut row in db.fetch(query).await? {
            let count: i64 = row.take(Aggregate::ALIAS)?;
            if let Some(key) = row.get(column).and_then(Value::to_key) {
                counts.insert(key, count);
            }
        }
    }

    let name = format!("{property}Count");
    for (owner, key) in owners.iter_mut().zip(&owner_keys) {
        let count = key
            .as_ref()
            .and_then(|key| counts.get(key))
            .copied()
            .unwrap_or(0);
        owner.state_mut().set_extra(&name, count);
    }

    Ok(())
}

/// The single query fetching related rows for `keys`, and the result column
/// holding each row's owner key.
fn related_query(db: &Db, relation: &ResolvedRelation, keys: Vec<Value>) -> (Query, String) {
    match relation {
        ResolvedRelation::HasOne(rel) | ResolvedRelation::HasMany(rel) => (
            filter_keys(Query::table(&rel.target.table), &rel.foreign_key, keys),
            rel.foreign_key.clone(),
        ),
        ResolvedRelation::BelongsTo(rel) => (
            filter_keys(Query::table(&rel.target.table), &rel.related_key, keys),
            rel.related_key.clone(),
        ),
        ResolvedRelation::BelongsToMany(rel) => {
            let serializer = db.serializer();
            let target = serializer.ident(&rel.target.table);
            let pivot = serializer.ident(&rel.pivot.table);

            let parent_alias = format!("{PIVOT_PREFIX}{}", rel.pivot.parent_key);
            let related_alias = format!("{PIVOT_PREFIX}{}", rel.pivot.related_key);

            let query = Query::table(&rel.target.table)
                .select_raw(format!("{target}.*"))
                .select_raw(format!(
                    "{pivot}.{} AS {}",
                    serializer.ident(&rel.pivot.parent_key),
                    serializer.ident(&parent_alias)
                ))
                .select_raw(format!(
                    "{pivot}.{} AS {}",
                    serializer.ident(&rel.pivot.related_key),
                    serializer.ident(&related_alias)
                ))
                .join(
                    &rel.pivot.table,
                    format!("{target}.{}", serializer.ident(&rel.related_key)),
                    BinaryOp::Eq,
                    format!("{pivot}.{}", serializer.ident(&rel.pivot.related_key)),
                );

            let column = format!("{pivot}.{}", serializer.ident(&rel.pivot.parent_key));
            (filter_keys(query, &column, keys), parent_alias)
        }
    }
}

/// `column = key` for a single key, `column IN (...)` otherwise.
fn filter_keys(query: Query, column: &str, mut keys: Vec<Value>) -> Query {
    if keys.len() == 1 {
        let key = keys.remove(0);
        query.where_eq(column, key)
    } else {
        query.where_in(column, keys)
    }
}

fn group_rows(rows: Vec<Row>, column: &str) -> HashMap<Key, Vec<Row>> {
    let mut groups: HashMap<Key, Vec<Row>> = HashMap::new();
    for row in rows {
        if let Some(key) = row.get(column).and_then(Value::to_key) {
            groups.entry(key).or_default().push(row);
        }
    }
    groups
}

/// Distinct keys, in first-seen order.
fn distinct(keys: &[Option<Key>]) -> Vec<Value> {
    let mut seen = HashSet::new();
    keys.iter()
        .flatten()
        .filter(|key| seen.insert(*key))
        .map(|key| Value::from(key.clone()))
        .collect()
}

/// For each key, the last position that uses it.
fn last_use(keys: &[Option<Key>]) -> HashMap<&Key, usize> {
    keys.iter()
        .enumerate()
        .filter_map(|(position, key)| key.as_ref().map(|key| (key, position)))
        .collect()
}
