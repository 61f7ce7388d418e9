use super::Error;

/// A statement was rejected, either while it was being built or by the
/// database itself.
///
/// Queries are assembled from static metadata, so this error points at a
/// bug in an entity's metadata or in the query construction code.
#[derive(Debug)]
pub(super) enum StatementError {
    Invalid { message: Box<str> },
    Rejected { inner: Box<dyn std::error::Error + Send + Sync> },
}

impl StatementError {
    pub(super) fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatementError::Invalid { .. } => None,
            StatementError::Rejected { inner } => Some(inner.as_ref()),
        }
    }
}

impl core::fmt::Display for StatementError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("statement error: ")?;

        match self {
            StatementError::Invalid { message } => f.write_str(message),
            StatementError::Rejected { inner } => {
                core::fmt::Display::fmt(inner, f)?;
                let mut source = inner.source();
                while let Some(err) = source {
                    write!(f, ": {}", err)?;
                    source = err.source();
                }
                Ok(())
            }
        }
    }
}

impl Error {
    /// A statement could not be built from the supplied metadata.
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Statement(StatementError::Invalid {
            message: message.into().into(),
        }))
    }

    /// The database refused to prepare or execute a statement.
    pub fn statement_rejected(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Statement(StatementError::Rejected {
            inner: Box::new(err),
        }))
    }

    pub fn is_statement(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::Statement(_)))
    }
}
