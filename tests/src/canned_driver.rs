use joinery_core::{
    async_trait,
    driver::{Capability, Connection, Driver, Operation, Response},
    stmt::Row,
    Result,
};
use std::borrow::Cow;

/// Answers every query with the same rows. Used to hand the materializer
/// result sets a real database would not produce.
#[derive(Debug, Clone)]
pub struct CannedDriver {
    rows: Vec<Row>,
}

impl CannedDriver {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl Driver for CannedDriver {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed("canned:")
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(CannedConnection {
            rows: self.rows.clone(),
        }))
    }
}

#[derive(Debug)]
struct CannedConnection {
    rows: Vec<Row>,
}

#[async_trait]
impl Connection for CannedConnection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(_) => Ok(Response::values(self.rows.clone())),
            _ => Ok(Response::count(0)),
        }
    }
}
