mod value;
use value::Value;

use quarry_core::{
    async_trait,
    driver::{Capability, ColumnInfo, Connection},
    err,
    stmt::{self, Row},
    Error, Result,
};
use quarry_sql::Serializer;
use rusqlite::Connection as RusqliteConnection;
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};
use url::Url;

/// A SQLite database, either a file or in memory.
///
/// SQLite only partially supports `ALTER TABLE`, so schema changes to
/// existing tables go through a rebuild.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<RusqliteConnection>,
    location: Location,
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Opens a database from a URL: `sqlite::memory:` or `sqlite:<path>`.
    pub fn connect(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Creates an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;

        Ok(Self {
            connection: Mutex::new(connection),
            location: Location::InMemory,
        })
    }

    /// Opens the database file at `path`, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let connection = RusqliteConnection::open(&path).map_err(Error::driver_operation_failed)?;

        Ok(Self {
            connection: Mutex::new(connection),
            location: Location::File(path),
        })
    }

    pub fn url(&self) -> String {
        match &self.location {
            Location::InMemory => "sqlite::memory:".to_string(),
            Location::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&RusqliteConnection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| err!("sqlite connection lock poisoned"))?;
        f(&connection).map_err(Error::driver_operation_failed)
    }

    fn query(&self, sql: &str, bindings: &[stmt::Value]) -> Result<Vec<Row>> {
        self.with_connection(|connection| {
            let mut stmt = connection.prepare_cached(sql)?;
            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(str::to_string)
                .collect();

            let params = bindings.iter().map(Value::from);
            let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

            let mut ret = vec![];
            while let Some(row) = rows.next()? {
                let mut record = Row::with_capacity(columns.len());
                for (index, column) in columns.iter().enumerate() {
                    record.insert(column.as_str(), value::from_sql(row.get_ref(index)?));
                }
                ret.push(record);
            }

            Ok(ret)
        })
        .map_err(|err| err.with_sql(sql, bindings))
    }

    fn execute(&self, sql: &str, bindings: &[stmt::Value]) -> Result<usize> {
        self.with_connection(|connection| {
            let params = bindings.iter().map(Value::from);
            connection.execute(sql, rusqlite::params_from_iter(params))
        })
        .map_err(|err| err.with_sql(sql, bindings))
    }
}

#[async_trait]
impl Connection for Sqlite {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn run(&self, sql: &str, bindings: &[stmt::Value]) -> Result<u64> {
        let count = self.execute(sql, bindings)?;
        Ok(count as u64)
    }

    async fn insert_one(&self, sql: &str, bindings: &[stmt::Value]) -> Result<stmt::Value> {
        // The statement and the rowid read must not interleave with another
        // caller's insert.
        let id = self
            .with_connection(|connection| {
                let params = bindings.iter().map(Value::from);
                connection.execute(sql, rusqlite::params_from_iter(params))?;
                Ok(connection.last_insert_rowid())
            })
            .map_err(|err| err.with_sql(sql, bindings))?;

        Ok(stmt::Value::I64(id))
    }

    async fn get(&self, sql: &str, bindings: &[stmt::Value]) -> Result<Vec<Row>> {
        self.query(sql, bindings)
    }

    async fn tables(&self) -> Result<Vec<String>> {
        let compiled = Serializer::sqlite().list_tables();

        self.query(&compiled.sql, &compiled.bindings)?
            .into_iter()
            .map(|mut row| row.take("name"))
            .collect()
    }

    async fn table_columns(&self, name: &str) -> Result<Vec<ColumnInfo>> {
        let serializer = Serializer::sqlite();
        let compiled = serializer.table_columns(name);

        self.query(&compiled.sql, &compiled.bindings)?
            .into_iter()
            .map(|row| serializer.column_info(row))
            .collect()
    }

    async fn truncate(&self, table: &str) -> Result<()> {
        let compiled = Serializer::sqlite().truncate(table);
        self.execute(&compiled.sql, &compiled.bindings)?;
        Ok(())
    }
}
