use super::Statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Begin,
    Commit,
    Rollback,
}

impl Statement {
    pub fn begin() -> Self {
        Statement::Transaction(Transaction::Begin)
    }

    pub fn commit() -> Self {
        Statement::Transaction(Transaction::Commit)
    }

    pub fn rollback() -> Self {
        Statement::Transaction(Transaction::Rollback)
    }
}
