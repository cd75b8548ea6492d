use super::{Flavor, Ident, Params, ToSql};

use crate::stmt;

use quarry_core::schema::db;

impl ToSql for &stmt::ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.name);
        let not_null = if self.not_null { " NOT NULL" } else { "" };

        let ty = &self.ty;

        fmt!(f, name " " ty not_null);

        match f.serializer.flavor {
            Flavor::Sqlite => {
                if self.primary_key {
                    fmt!(f, " PRIMARY KEY");
                }
                if self.auto_increment {
                    fmt!(f, " AUTOINCREMENT");
                }
            }
            Flavor::Mysql => {
                if self.auto_increment {
                    fmt!(f, " AUTO_INCREMENT");
                }
                if self.primary_key {
                    fmt!(f, " PRIMARY KEY");
                }
            }
        }
    }
}

impl ToSql for &db::Type {
    fn to_sql<T: Params>(self, f: &mut super::Formatter<'_, T>) {
        f.dst.push_str(&self.to_string());
    }
}
