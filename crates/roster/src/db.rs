mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

use roster_core::{
    driver::{Capability, Connection, Driver},
    Result, Schema,
};

use std::{
    fmt,
    ops::{Deref, DerefMut},
    sync::{Mutex, MutexGuard, PoisonError},
};

/// A database handle owning a single blocking connection.
///
/// Callers take the connection with [`Db::connection`] for the span of
/// one unit of work and hand it to factories and references. The guard
/// serializes access between threads.
pub struct Db {
    driver: Box<dyn Driver>,
    connection: Mutex<Box<dyn Connection>>,
    schema: &'static Schema,
}

/// Exclusive access to the connection of a [`Db`], released on drop.
pub struct ConnectionGuard<'a> {
    guard: MutexGuard<'a, Box<dyn Connection>>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Blocks until the connection is free.
    pub fn connection(&self) -> ConnectionGuard<'_> {
        let guard = self
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        ConnectionGuard { guard }
    }

    /// Creates the registered tables. Intended for fresh databases such as
    /// test fixtures.
    pub fn push_schema(&self) -> Result<()> {
        tracing::debug!(url = %self.driver.url(), tables = self.schema.tables.len(), "push schema");
        self.connection().push_schema(self.schema)
    }

    pub fn capability(&self) -> &'static Capability {
        self.driver.capability()
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.driver)
            .field("tables", &self.schema.tables.len())
            .finish()
    }
}

impl Deref for ConnectionGuard<'_> {
    type Target = dyn Connection;

    fn deref(&self) -> &Self::Target {
        &**self.guard
    }
}

impl DerefMut for ConnectionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut **self.guard
    }
}
