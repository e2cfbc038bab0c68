use super::Transaction;
use crate::stmt::Statement;

#[derive(Debug)]
pub enum Operation {
    /// Run a statement that yields rows.
    QuerySql(Statement),

    /// Run a statement and report the number of affected rows.
    ExecSql(Statement),

    /// Begin, commit or roll back a transaction.
    Transaction(Transaction),
}

impl Operation {
    pub fn sql(&self) -> Option<&str> {
        match self {
            Operation::QuerySql(stmt) | Operation::ExecSql(stmt) => Some(&stmt.sql),
            Operation::Transaction(_) => None,
        }
    }
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Self::Transaction(value)
    }
}
