use joinery_core::{
    async_trait,
    driver::{Capability, Connection, Driver, Operation, Response},
    stmt::Statement,
    Result,
};
use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};

/// Wraps a driver and records every statement sent through it.
#[derive(Debug)]
pub struct LoggingDriver<D> {
    inner: D,
    log: ExecLog,
}

impl<D: Driver> LoggingDriver<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            log: ExecLog::default(),
        }
    }

    /// Get a handle to the statements executed through this driver
    pub fn log(&self) -> ExecLog {
        self.log.clone()
    }
}

#[async_trait]
impl<D: Driver> Driver for LoggingDriver<D> {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            log: self.log.clone(),
        }))
    }
}

#[derive(Debug)]
struct LoggingConnection {
    inner: Box<dyn Connection>,
    log: ExecLog,
}

#[async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        if let Operation::QuerySql(stmt) | Operation::ExecSql(stmt) = &op {
            self.log.push(stmt.clone());
        }

        self.inner.exec(op).await
    }
}

/// Statements recorded by a [`LoggingDriver`], oldest first.
#[derive(Debug, Clone, Default)]
pub struct ExecLog {
    statements: Arc<Mutex<Vec<Statement>>>,
}

impl ExecLog {
    fn push(&self, stmt: Statement) {
        self.statements.lock().unwrap().push(stmt);
    }

    pub fn len(&self) -> usize {
        self.statements.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent statement.
    pub fn last(&self) -> Statement {
        self.statements
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no statement was executed")
    }

    pub fn clear(&self) {
        self.statements.lock().unwrap().clear();
    }
}
