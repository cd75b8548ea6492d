use super::Db;
use crate::{relation::hydrate_persisted, Entity};

use quarry_core::{
    stmt::{Query, Row, Value},
    Error, Result,
};

impl Db {
    /// Reads the entity whose primary key is `id`.
    ///
    /// Fails with a not-found error carrying the attempted statement when no
    /// row matches.
    pub async fn find<E: Entity>(&self, id: impl Into<Value>) -> Result<E> {
        let metadata = E::metadata();
        let pk = metadata.primary_key_column()?;

        let query = Query::table(&metadata.table)
            .where_eq(pk, id.into())
            .take(1);
        let compiled = self.compile(query)?;

        match self.fetch_first_compiled(&compiled).await? {
            Some(row) => hydrate_persisted(row),
            None => Err(Error::record_not_found(compiled.sql, compiled.bindings)),
        }
    }

    /// Builds an entity from `data` and inserts it.
    pub async fn create<E: Entity>(&self, data: Row) -> Result<E> {
        let mut entity = E::hydrate(data)?;
        self.save(&mut entity).await?;
        Ok(entity)
    }

    /// Inserts a new entity or updates an existing one by primary key.
    ///
    /// New entities get their created-at and updated-at columns stamped, and
    /// a null primary key is filled with the key the database generated.
    pub async fn save<E: Entity>(&self, entity: &mut E) -> Result<()> {
        let metadata = E::metadata();
        let pk = metadata.primary_key_column()?;
        let now = Value::from(chrono::Utc::now().naive_utc());

        if !entity.exists() {
            if let Some(column) = metadata.created_at_column() {
                entity.set_attribute(column, now.clone())?;
            }
            if let Some(column) = metadata.updated_at_column() {
                entity.set_attribute(column, now)?;
            }

            let mut row = entity.attributes();
            let generated = row.get(pk).map_or(true, Value::is_null);
            if generated {
                row.remove(pk);
            }

            let compiled = self.compile(Query::table(&metadata.table).insert_one(row))?;
            let id = self.insert_compiled(&compiled).await?;

            if generated {
                entity.set_attribute(pk, id)?;
            }
            entity.state_mut().exists = true;
        } else {
            if let Some(column) = metadata.updated_at_column() {
                entity.set_attribute(column, now)?;
            }

            let mut row = entity.attributes();
            let Some(key) = row.remove(pk) else {
                return Err(Error::invalid_statement(format!(
                    "`{}` has no value for primary key `{pk}`",
                    metadata.name
                )));
            };

            if row.is_empty() {
                return Ok(());
            }

            let query = Query::table(&metadata.table)
                .where_eq(pk, key)
                .update(row);
            self.exec(query).await?;
        }

        Ok(())
    }

    /// Deletes the entity by primary key. The instance is kept, marked as no
    /// longer existing.
    pub async fn delete<E: Entity>(&self, entity: &mut E) -> Result<()> {
        let metadata = E::metadata();
        let pk = metadata.primary_key_column()?;
        let key = entity.primary_key()?;

        self.exec(Query::table(&metadata.table).where_eq(pk, key).delete())
            .await?;

        entity.state_mut().exists = false;
        Ok(())
    }

    /// Re-reads every column of an existing entity. Loaded relationships
    /// are left as they are.
    pub async fn refresh<E: Entity>(&self, entity: &mut E) -> Result<()> {
        let metadata = E::metadata();
        let pk = metadata.primary_key_column()?;

        let query = Query::table(&metadata.table)
            .where_eq(pk, entity.primary_key()?)
            .take(1);
        let compiled = self.compile(query)?;

        let Some(row) = self.fetch_first_compiled(&compiled).await? else {
            return Err(Error::record_not_found(compiled.sql, compiled.bindings));
        };

        for (column, value) in row {
            entity.set_attribute(&column, value)?;
        }
        entity.state_mut().exists = true;

        Ok(())
    }
}
