use crate::{relation::hydrate_persisted, Db, Entity, Page};

use quarry_core::{
    stmt::{Aggregate, BinaryOp, FromValue, IntoOperand, Query, Raw, Value},
    Error, Result,
};

use std::marker::PhantomData;

/// A query over one entity's table that hydrates its results.
///
/// Filtering and ordering go to the wrapped [`Query`]; relationships named
/// with [`EntityQuery::with`] and [`EntityQuery::with_count`] are loaded for
/// the whole result set with one extra query each.
#[derive(Debug)]
pub struct EntityQuery<'a, E> {
    db: &'a Db,
    query: Query,
    with: Vec<String>,
    with_count: Vec<String>,
    _p: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> EntityQuery<'a, E> {
    pub(crate) fn new(db: &'a Db) -> EntityQuery<'a, E> {
        EntityQuery {
            db,
            query: Query::table(&E::metadata().table),
            with: vec![],
            with_count: vec![],
            _p: PhantomData,
        }
    }

    /// Applies arbitrary builder calls to the underlying query.
    ///
    /// ```ignore
    /// db.query::<User>()
    ///     .filter(|q| q.where_between("age", 18, 65).or_where_null("age"))
    ///     .get()
    ///     .await?;
    /// ```
    pub fn filter(mut self, f: impl FnOnce(Query) -> Query) -> Self {
        self.query = f(self.query);
        self
    }

    pub fn where_eq(self, column: impl Into<String>, value: impl IntoOperand) -> Self {
        self.filter(|q| q.where_eq(column, value))
    }

    pub fn or_where(self, column: impl Into<String>, value: impl IntoOperand) -> Self {
        self.filter(|q| q.or_where(column, value))
    }

    pub fn where_op(
        self,
        column: impl Into<String>,
        op: BinaryOp,
        value: impl IntoOperand,
    ) -> Self {
        self.filter(|q| q.where_op(column, op, value))
    }

    pub fn where_in<V: Into<Value>>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.filter(|q| q.where_in(column, values))
    }

    pub fn where_null(self, column: impl Into<String>) -> Self {
        self.filter(|q| q.where_null(column))
    }

    pub fn where_not_null(self, column: impl Into<String>) -> Self {
        self.filter(|q| q.where_not_null(column))
    }

    pub fn where_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        self.filter(|q| q.where_like(column, pattern))
    }

    pub fn where_raw(self, raw: impl Into<Raw>) -> Self {
        self.filter(|q| q.where_raw(raw))
    }

    pub fn order_by(self, column: impl Into<String>) -> Self {
        self.filter(|q| q.order_by(column))
    }

    pub fn order_by_desc(self, column: impl Into<String>) -> Self {
        self.filter(|q| q.order_by_desc(column))
    }

    pub fn take(self, count: u64) -> Self {
        self.filter(|q| q.take(count))
    }

    pub fn skip(self, offset: u64) -> Self {
        self.filter(|q| q.skip(offset))
    }

    /// Eager loads the named relationships on every result.
    pub fn with<S: Into<String>>(mut self, relations: impl IntoIterator<Item = S>) -> Self {
        self.with.extend(relations.into_iter().map(Into::into));
        self
    }

    /// Attaches a `<relation>Count` value to every result.
    pub fn with_count<S: Into<String>>(mut self, relations: impl IntoIterator<Item = S>) -> Self {
        self.with_count.extend(relations.into_iter().map(Into::into));
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn into_query(self) -> Query {
        self.query
    }

    /// Runs the query and hydrates every row.
    pub async fn get(self) -> Result<Vec<E>> {
        let rows = self.db.fetch(self.query).await?;

        let mut entities = rows
            .into_iter()
            .map(hydrate_persisted)
            .collect::<Result<Vec<E>>>()?;

        for relation in &self.with {
            self.db.load_many(&mut entities, relation).await?;
        }

        for relation in &self.with_count {
            self.db.load_count(&mut entities, relation).await?;
        }

        Ok(entities)
    }

    /// The first result, if any.
    pub async fn first(self) -> Result<Option<E>> {
        Ok(self.take(1).get().await?.into_iter().next())
    }

    /// The first result, failing with a not-found error if there is none.
    pub async fn first_or_fail(self) -> Result<E> {
        let this = self.take(1);
        let compiled = this.db.compile(this.query.clone())?;

        match this.get().await?.into_iter().next() {
            Some(entity) => Ok(entity),
            None => Err(Error::record_not_found(compiled.sql, compiled.bindings)),
        }
    }

    /// Number of matching rows. Ordering and limits are ignored.
    pub async fn count(self) -> Result<u64> {
        aggregate(self.db, unbounded(self.query).count()).await
    }

    /// Largest value of `column` among matching rows, null if none match.
    pub async fn max(self, column: impl Into<String>) -> Result<Value> {
        aggregate_value(self.db, unbounded(self.query).max(column)).await
    }

    /// One page of results. Pages are numbered from 1.
    pub async fn paginate(self, page: u64, per_page: u64) -> Result<Page<E>> {
        if page == 0 || per_page == 0 {
            return Err(Error::invalid_statement("page and per_page must be at least 1"));
        }

        let total = aggregate(self.db, unbounded(self.query.clone()).count()).await?;

        let items = self.skip((page - 1) * per_page).take(per_page).get().await?;

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }
}

async fn aggregate(db: &Db, query: Query) -> Result<u64> {
    match aggregate_value(db, query).await? {
        Value::Null => Ok(0),
        value => u64::from_value(value),
    }
}

async fn aggregate_value(db: &Db, query: Query) -> Result<Value> {
    let row = db.fetch_first(query).await?;
    Ok(row
        .and_then(|mut row| row.remove(Aggregate::ALIAS))
        .unwrap_or_default())
}

/// The query without ordering or limits, for aggregating over every match.
fn unbounded(mut query: Query) -> Query {
    query.order_by.clear();
    query.limit = None;
    query
}
