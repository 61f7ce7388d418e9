use crate::logging_driver::DriverOp;

use roster_core::driver::Operation;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The statements a [`Fixture`](crate::Fixture) connection executed, oldest
/// first.
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops().is_empty()
    }

    pub fn clear(&mut self) {
        self.ops().clear();
    }

    /// True when an UPDATE or DELETE ran.
    pub fn has_exec_sql(&self) -> bool {
        self.ops()
            .iter()
            .any(|op| matches!(op.operation, Operation::ExecSql(_)))
    }

    /// Number of SELECT statements, counts included.
    pub fn queries(&self) -> usize {
        self.ops().iter().filter(|op| op.operation.is_query()).count()
    }

    pub fn sql(&self) -> Vec<String> {
        self.ops()
            .iter()
            .map(|op| op.operation.sql().to_string())
            .collect()
    }

    /// Removes the oldest statement, which must have succeeded.
    #[track_caller]
    pub fn pop_op(&mut self) -> Operation {
        let mut ops = self.ops();
        if ops.is_empty() {
            panic!("no statement was executed");
        }

        let DriverOp { operation, response } = ops.remove(0);
        if let Err(err) = response {
            panic!("statement failed: {err}; sql={}", operation.sql());
        }
        operation
    }

    fn ops(&self) -> MutexGuard<'_, Vec<DriverOp>> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
