mod capability;
pub use capability::{Capability, Flavor};

pub mod operation;
pub use operation::Operation;

mod response;
pub use response::{Response, Rows};

use crate::{schema::Schema, Result};

use std::{borrow::Cow, fmt::Debug};

/// Opens connections to one database.
pub trait Driver: Debug + Send + Sync + 'static {
    /// The connection URL this driver was configured with.
    fn url(&self) -> Cow<'_, str>;

    /// Describes the SQL dialect spoken by connections of this driver.
    fn capability(&self) -> &'static Capability;

    /// Opens a new connection. Blocks until the database is reachable.
    fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A single blocking database session.
///
/// Every statement, cursor and intermediate buffer an `exec` call acquires
/// is released before it returns, whether it succeeds or fails.
pub trait Connection: Debug + Send + 'static {
    fn capability(&self) -> &'static Capability;

    /// Execute a database operation
    fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Creates the tables of `schema` in an empty database.
    fn push_schema(&mut self, schema: &Schema) -> Result<()>;
}
