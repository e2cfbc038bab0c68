use crate::stmt::{Row, Value};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by a query, in cursor order
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    pub fn into_count(self) -> crate::Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            Rows::Values(rows) => Ok(rows.len() as u64),
        }
    }

    pub fn into_values(self) -> crate::Result<Vec<Row>> {
        match self {
            Rows::Values(rows) => Ok(rows),
            Rows::Count(count) => Err(crate::err!(
                "expected rows from the executor, got a count of {count}"
            )),
        }
    }

    /// Returns the first column of the first row, or `Null` when the query
    /// produced no rows.
    pub fn into_scalar(self) -> crate::Result<Value> {
        let rows = self.into_values()?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.into_values().next())
            .unwrap_or(Value::Null))
    }
}
