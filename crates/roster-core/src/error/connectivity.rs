use super::Error;

/// The database connection could not be obtained or used.
///
/// Wraps the driver library's own error (rusqlite, IO, ...).
#[derive(Debug)]
pub(super) struct ConnectivityError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConnectivityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("connectivity error: ")?;
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a failure to open or talk to the database.
    pub fn connectivity(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Connectivity(ConnectivityError {
            inner: Box::new(err),
        }))
    }

    pub fn is_connectivity(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::Connectivity(_)))
    }
}
