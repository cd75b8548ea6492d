use super::{Direction, Raw};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub target: OrderByTarget,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderByTarget {
    Column(String),
    Raw(Raw),
}
