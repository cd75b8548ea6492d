use super::{Comma, Flavor, Ident, Params, ToSql};

use crate::stmt::{self, AlterTableAction, Statement, Transaction};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::AddColumn(stmt) => stmt.to_sql(f),
            Statement::AddPrimaryKey(stmt) => stmt.to_sql(f),
            Statement::AlterTable(stmt) => stmt.to_sql(f),
            Statement::CopyTable(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::DropColumn(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::ModifyColumn(stmt) => stmt.to_sql(f),
            Statement::Transaction(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "CREATE TABLE " Ident(&self.name) " (" Comma(self.columns.iter()) ")");
    }
}

impl ToSql for &stmt::AddColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = &self.column;
        fmt!(f, "ALTER TABLE " Ident(&self.table) " ADD COLUMN " column);
    }
}

impl ToSql for &stmt::ModifyColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = &self.column;
        fmt!(f, "ALTER TABLE " Ident(&self.table) " MODIFY COLUMN " column);
    }
}

impl ToSql for &stmt::DropColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "ALTER TABLE " Ident(&self.table) " DROP COLUMN " Ident(&self.column));
    }
}

impl ToSql for &stmt::AddPrimaryKey {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "ALTER TABLE " Ident(&self.table) " ADD PRIMARY KEY (" Ident(&self.column) ")");
    }
}

impl ToSql for &stmt::AlterTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match &self.action {
            AlterTableAction::RenameTo(new_name) => {
                fmt!(f, "ALTER TABLE " Ident(&self.name) " RENAME TO " Ident(new_name))
            }
        }
    }
}

impl ToSql for &stmt::CopyTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let targets = self
            .columns
            .iter()
            .chain(self.filled.iter().map(|(column, _)| column));
        let sources = self
            .columns
            .iter()
            .map(Source::Column)
            .chain(self.filled.iter().map(|(_, literal)| Source::Literal(literal)));

        fmt!(
            f,
            "INSERT INTO " Ident(&self.target) " (" Comma(targets.map(Ident)) ") SELECT " Comma(sources) " FROM " Ident(&self.source)
        );
    }
}

enum Source<'a> {
    Column(&'a String),
    Literal(&'a str),
}

impl ToSql for Source<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Source::Column(column) => fmt!(f, Ident(column)),
            Source::Literal(literal) => fmt!(f, literal),
        }
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        fmt!(f, "DROP TABLE " if_exists Ident(&self.name));
    }
}

impl ToSql for &Transaction {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let sql = match (self, f.serializer.flavor) {
            (Transaction::Begin, Flavor::Mysql) => "START TRANSACTION",
            (Transaction::Begin, Flavor::Sqlite) => "BEGIN",
            (Transaction::Commit, _) => "COMMIT",
            (Transaction::Rollback, _) => "ROLLBACK",
        };
        fmt!(f, sql);
    }
}
