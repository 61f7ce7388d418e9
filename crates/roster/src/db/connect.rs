use roster_core::{
    driver::{Capability, Connection, Driver},
    Error, Result,
};

use std::borrow::Cow;
use url::Url;

/// Selects the driver named by a connection URL's scheme.
#[derive(Debug)]
pub struct Connect {
    url: Url,
    capability: &'static Capability,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|err| Error::invalid_connection_url(url, err))?;

        let capability = match parsed.scheme() {
            "sqlite" => &Capability::SQLITE,
            scheme => {
                return Err(Error::invalid_connection_url(
                    url,
                    format_args!("no driver for the `{scheme}` scheme"),
                ))
            }
        };

        Ok(Self {
            url: parsed,
            capability,
        })
    }
}

impl Driver for Connect {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.url.as_str())
    }

    fn capability(&self) -> &'static Capability {
        self.capability
    }

    fn connect(&self) -> Result<Box<dyn Connection>> {
        match self.url.scheme() {
            "sqlite" => connect_sqlite(&self.url),
            scheme => Err(anyhow::anyhow!("unsupported database; scheme={scheme}; url={}", self.url).into()),
        }
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &Url) -> Result<Box<dyn Connection>> {
    roster_driver_sqlite::Sqlite::new(url.as_str())?.connect()
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &Url) -> Result<Box<dyn Connection>> {
    Err(anyhow::anyhow!("`sqlite` feature not enabled").into())
}
