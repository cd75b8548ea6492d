use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{
    Aggregate, Assignments, ColumnRef, Join, Limit, OrderByExpr, OrderByTarget, Query,
    StatementKind,
};

impl ToSql for &Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match &self.kind {
            StatementKind::Select => Select(self).to_sql(f),
            StatementKind::Insert(rows) => Insert(self, rows).to_sql(f),
            StatementKind::Update(assignments) => Update(self, assignments).to_sql(f),
            StatementKind::Delete => Delete(self).to_sql(f),
        }
    }
}

struct Select<'a>(&'a Query);

struct Insert<'a>(&'a Query, &'a [Assignments]);

struct Update<'a>(&'a Query, &'a Assignments);

struct Delete<'a>(&'a Query);

/// The table name. Statements reaching the serializer have one.
struct TableName<'a>(&'a Query);

/// ` WHERE ...`, ` ORDER BY ...` and the trailing `LIMIT`, shared by every
/// statement kind.
struct Filter<'a> {
    query: &'a Query,

    /// `UPDATE` and `DELETE` only accept a row count.
    count_only_limit: bool,
}

impl ToSql for Select<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let query = self.0;
        let distinct = if query.distinct { "DISTINCT " } else { "" };

        fmt!(f, "SELECT " distinct Projection(query) " FROM " TableName(query));

        for join in &query.joins {
            fmt!(f, " " join);
        }

        fmt!(f, Where(query));

        if !query.group_by.is_empty() {
            fmt!(f, " GROUP BY " Comma(query.group_by.iter()));
        }

        fmt!(f, Filter { query, count_only_limit: false });
    }
}

struct Projection<'a>(&'a Query);

impl ToSql for Projection<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let query = self.0;

        match &query.aggregate {
            // Grouped aggregates project the group columns so rows can be
            // matched back by key.
            Some(aggregate) if !query.group_by.is_empty() => {
                fmt!(f, Comma(query.group_by.iter()) ", " aggregate)
            }
            Some(aggregate) => fmt!(f, aggregate),
            None if query.columns.is_empty() => fmt!(f, "*"),
            None => fmt!(f, Comma(query.columns.iter())),
        }
    }
}

impl ToSql for &Aggregate {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, self.func.as_str() "(");
        if self.columns.is_empty() {
            fmt!(f, "*");
        } else {
            fmt!(f, Comma(self.columns.iter()));
        }
        fmt!(f, ") AS " Aggregate::ALIAS);
    }
}

impl ToSql for &ColumnRef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            ColumnRef::Name(name) => fmt!(f, name),
            ColumnRef::Raw(raw) => fmt!(f, raw),
        }
    }
}

impl ToSql for &Join {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, self.kind.as_str() " JOIN " Ident(&self.table));

        if let Some(on) = &self.on {
            let (left, right) = (&on.left, &on.right);
            fmt!(f, " ON " left " " on.op.as_str() " " right);
        }
    }
}

impl ToSql for Insert<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let Insert(query, rows) = self;
        fmt!(f, "INSERT INTO " TableName(query));

        let Some(first) = rows.first() else {
            return;
        };

        if first.is_empty() {
            if f.serializer.is_mysql() {
                fmt!(f, " () VALUES ()");
            } else {
                fmt!(f, " DEFAULT VALUES");
            }
            return;
        }

        let columns: Vec<&str> = first.columns().collect();

        fmt!(f, " (" Comma(columns.iter().map(Ident)) ") VALUES ");

        let mut s = "";
        for row in rows {
            fmt!(f, s "(");
            let mut sep = "";
            for column in &columns {
                fmt!(f, sep row.get(column));
                sep = ", ";
            }
            fmt!(f, ")");
            s = ", ";
        }
    }
}

impl ToSql for Update<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let Update(query, assignments) = self;
        fmt!(f, "UPDATE " TableName(query) " SET ");

        let mut s = "";
        for (column, value) in assignments.iter() {
            fmt!(f, s Ident(column) " = " value);
            s = ", ";
        }

        fmt!(f, Targets(query));
    }
}

impl ToSql for Delete<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let query = self.0;
        fmt!(f, "DELETE FROM " TableName(query) Targets(query));
    }
}

/// The rows an `UPDATE` or `DELETE` touches.
///
/// SQLite only accepts `ORDER BY` and `LIMIT` here when built with
/// `SQLITE_ENABLE_UPDATE_DELETE_LIMIT`, so it selects the rows by `rowid`
/// instead.
struct Targets<'a>(&'a Query);

impl ToSql for Targets<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let query = self.0;
        let filter = Filter { query, count_only_limit: true };

        let bounded = !query.order_by.is_empty()
            || query.limit.is_some_and(|limit| limit.count.is_some());

        if f.serializer.is_sqlite() && bounded {
            fmt!(
                f,
                " WHERE rowid IN (SELECT rowid FROM " TableName(query) Where(query) filter ")"
            );
        } else {
            fmt!(f, Where(query) filter);
        }
    }
}

impl ToSql for TableName<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(table) = &self.0.table {
            fmt!(f, Ident(table));
        }
    }
}

struct Where<'a>(&'a Query);

impl ToSql for Where<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.0.clauses.is_empty() {
            return;
        }

        fmt!(f, " WHERE ");

        for (index, clause) in self.0.clauses.iter().enumerate() {
            if index > 0 {
                fmt!(f, " " clause.connector.as_str() " ");
            }
            fmt!(f, &clause.kind);
        }
    }
}

impl ToSql for Filter<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let query = self.query;

        if !query.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(query.order_by.iter()));
        }

        match query.limit {
            Some(limit) if self.count_only_limit => {
                if let Some(count) = limit.count {
                    fmt!(f, " LIMIT " count);
                }
            }
            Some(limit) => fmt!(f, " LIMIT " limit),
            None => {}
        }
    }
}

impl ToSql for &OrderByExpr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match &self.target {
            OrderByTarget::Column(column) => {
                fmt!(f, column " " self.direction.as_str())
            }
            OrderByTarget::Raw(raw) => fmt!(f, raw),
        }
    }
}

impl ToSql for Limit {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        // Both databases read `LIMIT a, b` as offset `a`, count `b`. Neither
        // has an offset-only form, so a missing count becomes the largest
        // value both accept.
        match (self.offset, self.count) {
            (0, Some(count)) => fmt!(f, count),
            (offset, Some(count)) => fmt!(f, offset ", " count),
            (offset, None) => {
                let all = i64::MAX as u64;
                fmt!(f, offset ", " all)
            }
        }
    }
}
