use super::{Connect, Db};
use crate::model;

use roster_core::{driver::Driver, Result, Schema};

use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct Builder {
    /// Registry to use instead of the built-in entity model
    schema: Option<&'static Schema>,
}

impl Builder {
    pub fn schema(&mut self, schema: &'static Schema) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    /// Picks a driver from the URL scheme and connects with it.
    pub fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?)
    }

    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let schema = match self.schema {
            Some(schema) => schema,
            None => model::schema()?,
        };

        let connection = driver.connect()?;
        tracing::debug!(url = %driver.url(), "connected");

        Ok(Db {
            driver: Box::new(driver),
            connection: Mutex::new(connection),
            schema,
        })
    }
}
