use roster_core::{
    driver::{Capability, Connection, Driver, Operation, Response},
    Result, Schema,
};

use std::{
    borrow::Cow,
    sync::{Arc, Mutex, PoisonError},
};

/// Wraps a driver so every connection it opens records what it runs.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl LoggingDriver {
    pub fn new(driver: impl Driver) -> Self {
        Self {
            inner: Box::new(driver),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The log shared by every connection, read through
    /// [`ExecLog`](crate::ExecLog).
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }
}

impl Driver for LoggingDriver {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect()?,
            ops_log: self.ops_log_handle(),
        }))
    }
}

/// One executed operation and what the database answered.
#[derive(Debug)]
pub struct DriverOp {
    pub operation: Operation,
    pub response: Result<Response>,
}

#[derive(Debug)]
pub struct LoggingConnection {
    inner: Box<dyn Connection>,

    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl Connection for LoggingConnection {
    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    fn exec(&mut self, operation: Operation) -> Result<Response> {
        let response = self.inner.exec(operation.clone());
        tracing::trace!(sql = operation.sql(), ok = response.is_ok(), "exec");

        let mut ops_log = self.ops_log.lock().unwrap_or_else(PoisonError::into_inner);
        ops_log.push(DriverOp {
            operation,
            response: response.clone(),
        });

        response
    }

    fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        self.inner.push_schema(schema)
    }
}
