use super::{
    Aggregate, AggregateFunc, Assignments, BinaryOp, Clause, ClauseKind, ColumnRef, Connector,
    Direction, IntoOperand, Join, JoinKind, JoinOn, Limit, OrderByExpr, OrderByTarget, Raw,
    SubSelectOp, Value,
};

/// A single logical SQL statement under construction.
///
/// Builder methods take `self` by value and return it, so calls chain. Each
/// call appends to the relevant list and never reorders earlier state.
///
/// The statement kind is decided by the last call among [`Query::select`],
/// [`Query::insert`], [`Query::update`] and [`Query::delete`]. Joins and
/// clauses are kept regardless and rendered wherever the kind uses them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub table: Option<String>,
    pub columns: Vec<ColumnRef>,
    pub distinct: bool,
    pub joins: Vec<Join>,
    pub clauses: Vec<Clause>,
    pub group_by: Vec<String>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<Limit>,
    pub aggregate: Option<Aggregate>,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatementKind {
    #[default]
    Select,
    Insert(Vec<Assignments>),
    Update(Assignments),
    Delete,
}

impl Query {
    /// An empty query with no table, as handed to sub-select closures.
    pub fn new() -> Query {
        Query::default()
    }

    pub fn table(name: impl Into<String>) -> Query {
        Query::new().from(name)
    }

    pub fn from(mut self, name: impl Into<String>) -> Query {
        self.table = Some(name.into());
        self
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, StatementKind::Select)
    }

    fn push(mut self, connector: Connector, kind: ClauseKind) -> Query {
        self.clauses.push(Clause::new(connector, kind));
        self
    }

    fn compare(
        mut self,
        connector: Connector,
        column: impl Into<String>,
        op: BinaryOp,
        value: impl IntoOperand,
    ) -> Query {
        self.clauses
            .push(Clause::compare(connector, column, op, value.into_operand()));
        self
    }

    // ===== basic comparisons =====

    /// `column = value`. A [`Query`] value compiles to a sub-select.
    pub fn where_eq(self, column: impl Into<String>, value: impl IntoOperand) -> Query {
        self.compare(Connector::And, column, BinaryOp::Eq, value)
    }

    /// Alias of [`Query::where_eq`], for chains that spell out their
    /// connectors next to [`Query::or_where`].
    pub fn and_where(self, column: impl Into<String>, value: impl IntoOperand) -> Query {
        self.where_eq(column, value)
    }

    pub fn or_where(self, column: impl Into<String>, value: impl IntoOperand) -> Query {
        self.compare(Connector::Or, column, BinaryOp::Eq, value)
    }

    pub fn where_op(
        self,
        column: impl Into<String>,
        op: BinaryOp,
        value: impl IntoOperand,
    ) -> Query {
        self.compare(Connector::And, column, op, value)
    }

    pub fn or_where_op(
        self,
        column: impl Into<String>,
        op: BinaryOp,
        value: impl IntoOperand,
    ) -> Query {
        self.compare(Connector::Or, column, op, value)
    }

    // ===== IN =====

    pub fn where_in<V: Into<Value>>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Query {
        self.in_list(Connector::And, column, values, false)
    }

    pub fn or_where_in<V: Into<Value>>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Query {
        self.in_list(Connector::Or, column, values, false)
    }

    pub fn where_not_in<V: Into<Value>>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Query {
        self.in_list(Connector::And, column, values, true)
    }

    pub fn or_where_not_in<V: Into<Value>>(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Query {
        self.in_list(Connector::Or, column, values, true)
    }

    fn in_list<V: Into<Value>>(
        self,
        connector: Connector,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
        negated: bool,
    ) -> Query {
        self.push(
            connector,
            ClauseKind::In {
                column: column.into(),
                values: values.into_iter().map(Into::into).collect(),
                negated,
            },
        )
    }

    // ===== sub-selects =====

    /// `column <op> (<sub-query>)`, where the closure builds the sub-query.
    pub fn where_sub(
        self,
        column: impl Into<String>,
        op: BinaryOp,
        build: impl FnOnce(Query) -> Query,
    ) -> Query {
        self.sub_select(Connector::And, column, SubSelectOp::Cmp(op), build(Query::new()))
    }

    /// `column IN (<sub-query>)`.
    pub fn where_in_sub(self, column: impl Into<String>, build: impl FnOnce(Query) -> Query) -> Query {
        self.sub_select(Connector::And, column, SubSelectOp::In, build(Query::new()))
    }

    pub fn or_where_in_sub(
        self,
        column: impl Into<String>,
        build: impl FnOnce(Query) -> Query,
    ) -> Query {
        self.sub_select(Connector::Or, column, SubSelectOp::In, build(Query::new()))
    }

    pub fn where_not_in_sub(
        self,
        column: impl Into<String>,
        build: impl FnOnce(Query) -> Query,
    ) -> Query {
        self.sub_select(Connector::And, column, SubSelectOp::NotIn, build(Query::new()))
    }

    /// `column IN (<query>)` for an already built query.
    pub fn where_query(self, column: impl Into<String>, query: Query) -> Query {
        self.sub_select(Connector::And, column, SubSelectOp::In, query)
    }

    fn sub_select(
        self,
        connector: Connector,
        column: impl Into<String>,
        op: SubSelectOp,
        query: Query,
    ) -> Query {
        self.push(
            connector,
            ClauseKind::SubSelect {
                column: column.into(),
                op,
                query: Box::new(query),
            },
        )
    }

    // ===== BETWEEN =====

    pub fn where_between(
        self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Query {
        self.between(Connector::And, column, low, high, false)
    }

    pub fn or_where_between(
        self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Query {
        self.between(Connector::Or, column, low, high, false)
    }

    pub fn where_not_between(
        self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Query {
        self.between(Connector::And, column, low, high, true)
    }

    pub fn or_where_not_between(
        self,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Query {
        self.between(Connector::Or, column, low, high, true)
    }

    fn between(
        self,
        connector: Connector,
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
        negated: bool,
    ) -> Query {
        self.push(
            connector,
            ClauseKind::Between {
                column: column.into(),
                low: low.into(),
                high: high.into(),
                negated,
            },
        )
    }

    // ===== NULL =====

    pub fn where_null(self, column: impl Into<String>) -> Query {
        self.is_null(Connector::And, column, false)
    }

    pub fn or_where_null(self, column: impl Into<String>) -> Query {
        self.is_null(Connector::Or, column, false)
    }

    pub fn where_not_null(self, column: impl Into<String>) -> Query {
        self.is_null(Connector::And, column, true)
    }

    pub fn or_where_not_null(self, column: impl Into<String>) -> Query {
        self.is_null(Connector::Or, column, true)
    }

    fn is_null(self, connector: Connector, column: impl Into<String>, negated: bool) -> Query {
        self.push(
            connector,
            ClauseKind::IsNull {
                column: column.into(),
                negated,
            },
        )
    }

    // ===== LIKE =====

    pub fn where_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Query {
        self.like(Connector::And, column, pattern, false)
    }

    pub fn or_where_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Query {
        self.like(Connector::Or, column, pattern, false)
    }

    pub fn where_not_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Query {
        self.like(Connector::And, column, pattern, true)
    }

    pub fn or_where_not_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Query {
        self.like(Connector::Or, column, pattern, true)
    }

    fn like(
        self,
        connector: Connector,
        column: impl Into<String>,
        pattern: impl Into<Value>,
        negated: bool,
    ) -> Query {
        self.push(
            connector,
            ClauseKind::Like {
                column: column.into(),
                pattern: pattern.into(),
                negated,
            },
        )
    }

    // ===== raw =====

    pub fn where_raw(self, raw: impl Into<Raw>) -> Query {
        self.push(Connector::And, ClauseKind::Raw(raw.into()))
    }

    pub fn or_where_raw(self, raw: impl Into<Raw>) -> Query {
        self.push(Connector::Or, ClauseKind::Raw(raw.into()))
    }

    // ===== projection =====

    /// Switches to a `SELECT` and appends projected columns.
    pub fn select<C: Into<ColumnRef>>(mut self, columns: impl IntoIterator<Item = C>) -> Query {
        self.kind = StatementKind::Select;
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn select_raw(self, raw: impl Into<Raw>) -> Query {
        self.select([ColumnRef::Raw(raw.into())])
    }

    pub fn distinct(mut self) -> Query {
        self.distinct = true;
        self
    }

    // ===== joins =====

    pub fn join(
        self,
        table: impl Into<String>,
        left: impl Into<String>,
        op: BinaryOp,
        right: impl Into<String>,
    ) -> Query {
        self.join_on(JoinKind::Inner, table, left, op, right)
    }

    pub fn left_join(
        self,
        table: impl Into<String>,
        left: impl Into<String>,
        op: BinaryOp,
        right: impl Into<String>,
    ) -> Query {
        self.join_on(JoinKind::Left, table, left, op, right)
    }

    pub fn right_join(
        self,
        table: impl Into<String>,
        left: impl Into<String>,
        op: BinaryOp,
        right: impl Into<String>,
    ) -> Query {
        self.join_on(JoinKind::Right, table, left, op, right)
    }

    pub fn cross_join(mut self, table: impl Into<String>) -> Query {
        self.joins.push(Join {
            kind: JoinKind::Cross,
            table: table.into(),
            on: None,
        });
        self
    }

    fn join_on(
        mut self,
        kind: JoinKind,
        table: impl Into<String>,
        left: impl Into<String>,
        op: BinaryOp,
        right: impl Into<String>,
    ) -> Query {
        self.joins.push(Join {
            kind,
            table: table.into(),
            on: Some(JoinOn {
                left: left.into(),
                op,
                right: right.into(),
            }),
        });
        self
    }

    // ===== grouping, ordering, limits =====

    pub fn group_by<C: Into<String>>(mut self, columns: impl IntoIterator<Item = C>) -> Query {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn order_by(self, column: impl Into<String>) -> Query {
        self.order(OrderByTarget::Column(column.into()), Direction::Asc)
    }

    pub fn order_by_desc(self, column: impl Into<String>) -> Query {
        self.order(OrderByTarget::Column(column.into()), Direction::Desc)
    }

    pub fn order_by_raw(self, raw: impl Into<Raw>) -> Query {
        self.order(OrderByTarget::Raw(raw.into()), Direction::Asc)
    }

    fn order(mut self, target: OrderByTarget, direction: Direction) -> Query {
        self.order_by.push(OrderByExpr { target, direction });
        self
    }

    /// Sets `LIMIT offset, count`; `count: None` keeps every row after `offset`.
    pub fn limit(mut self, offset: u64, count: Option<u64>) -> Query {
        self.limit = Some(Limit { offset, count });
        self
    }

    pub fn take(mut self, count: u64) -> Query {
        self.limit.get_or_insert_with(Limit::default).count = Some(count);
        self
    }

    pub fn skip(mut self, offset: u64) -> Query {
        self.limit.get_or_insert_with(Limit::default).offset = offset;
        self
    }

    // ===== aggregates =====

    pub fn count(self) -> Query {
        self.aggregate(AggregateFunc::Count, Vec::<String>::new())
    }

    pub fn count_columns<C: Into<String>>(self, columns: impl IntoIterator<Item = C>) -> Query {
        self.aggregate(AggregateFunc::Count, columns)
    }

    pub fn max(self, column: impl Into<String>) -> Query {
        self.aggregate(AggregateFunc::Max, [column])
    }

    pub fn min(self, column: impl Into<String>) -> Query {
        self.aggregate(AggregateFunc::Min, [column])
    }

    pub fn sum(self, column: impl Into<String>) -> Query {
        self.aggregate(AggregateFunc::Sum, [column])
    }

    pub fn avg(self, column: impl Into<String>) -> Query {
        self.aggregate(AggregateFunc::Avg, [column])
    }

    fn aggregate<C: Into<String>>(
        mut self,
        func: AggregateFunc,
        columns: impl IntoIterator<Item = C>,
    ) -> Query {
        self.kind = StatementKind::Select;
        self.aggregate = Some(Aggregate {
            func,
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    // ===== writes =====

    /// Switches to an `INSERT` of `rows`. The column list comes from the
    /// first row.
    pub fn insert<R: Into<Assignments>>(mut self, rows: impl IntoIterator<Item = R>) -> Query {
        self.kind = StatementKind::Insert(rows.into_iter().map(Into::into).collect());
        self
    }

    pub fn insert_one(self, row: impl Into<Assignments>) -> Query {
        self.insert([row])
    }

    pub fn update(mut self, assignments: impl Into<Assignments>) -> Query {
        self.kind = StatementKind::Update(assignments.into());
        self
    }

    pub fn delete(mut self) -> Query {
        self.kind = StatementKind::Delete;
        self
    }
}
