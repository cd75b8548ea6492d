//! Catalog queries used to read back the live schema.

use crate::{Compiled, Serializer};

use quarry_core::{driver::ColumnInfo, stmt::Row, Result};

impl Serializer {
    /// Lists user tables, one `name` column per row, sorted by name.
    pub fn list_tables(&self) -> Compiled {
        let sql = if self.is_sqlite() {
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
        } else {
            "SELECT TABLE_NAME AS name FROM information_schema.TABLES WHERE TABLE_SCHEMA = DATABASE() ORDER BY TABLE_NAME"
        };

        Compiled {
            sql: sql.to_string(),
            bindings: vec![],
        }
    }

    /// Lists the columns of `table` in ordinal order. Rows are read back with
    /// [`Serializer::column_info`].
    pub fn table_columns(&self, table: &str) -> Compiled {
        let sql = if self.is_sqlite() {
            "SELECT name, type, \"notnull\" AS not_null, pk FROM pragma_table_info(?) ORDER BY cid"
        } else {
            "SELECT COLUMN_NAME AS name, COLUMN_TYPE AS type, IS_NULLABLE AS nullable, \
             COLUMN_KEY AS column_key, EXTRA AS extra \
             FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
             ORDER BY ORDINAL_POSITION"
        };

        Compiled {
            sql: sql.to_string(),
            bindings: vec![table.into()],
        }
    }

    /// Reads a row returned by [`Serializer::table_columns`].
    pub fn column_info(&self, mut row: Row) -> Result<ColumnInfo> {
        let name: String = row.take("name")?;
        let ty: String = row.take("type")?;

        if self.is_sqlite() {
            let not_null: bool = row.take("not_null")?;
            let primary_key = row.take::<i64>("pk")? > 0;

            // `INTEGER PRIMARY KEY` aliases the rowid and always generates keys.
            let auto_increment = primary_key && ty.eq_ignore_ascii_case("integer");

            Ok(ColumnInfo {
                name,
                ty,
                nullable: !not_null && !primary_key,
                primary_key,
                auto_increment,
            })
        } else {
            let nullable: String = row.take("nullable")?;
            let column_key: Option<String> = row.take("column_key")?;
            let extra: Option<String> = row.take("extra")?;

            Ok(ColumnInfo {
                name,
                ty,
                nullable: nullable.eq_ignore_ascii_case("yes"),
                primary_key: column_key.is_some_and(|key| key.eq_ignore_ascii_case("pri")),
                auto_increment: extra
                    .is_some_and(|extra| extra.to_ascii_lowercase().contains("auto_increment")),
            })
        }
    }

    /// Removes every row from `table`. MySQL also resets the key counter;
    /// SQLite has no `TRUNCATE` and keeps it.
    pub fn truncate(&self, table: &str) -> Compiled {
        let sql = if self.is_sqlite() {
            format!("DELETE FROM {}", self.ident(table))
        } else {
            format!("TRUNCATE TABLE {}", self.ident(table))
        };

        Compiled {
            sql,
            bindings: vec![],
        }
    }
}
