mod adhoc;
mod connectivity;
mod consistency_fault;
mod invalid_connection_url;
mod invalid_row_state;
mod invalid_schema;
mod statement;
mod type_conversion;

use adhoc::AdhocError;
use connectivity::ConnectivityError;
use consistency_fault::ConsistencyFault;
use invalid_connection_url::InvalidConnectionUrl;
use invalid_row_state::InvalidRowState;
use invalid_schema::InvalidSchema;
use statement::StatementError;
use std::sync::Arc;
use type_conversion::TypeConversionError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised by the persistence core.
///
/// The error is a single pointer wide and cheap to clone, which lets
/// lazily-initialized registries cache a failed build and hand the same
/// error to every caller.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed outermost first, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(ErrorInner { kind, cause: None }) => kind,
                Ok(inner) => ErrorKind::Nested(Error {
                    inner: Some(Arc::new(inner)),
                }),
                Err(shared) => ErrorKind::Nested(Error {
                    inner: Some(shared),
                }),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Creates an ad-hoc error from format arguments. Used by `err!`/`bail!`.
    pub fn from_args(message: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(message.to_string())))
    }

    /// The innermost error of the chain.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.inner.as_ref().and_then(|inner| inner.cause.as_ref()) {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Kind predicates hold when any link of the chain has the kind,
    /// including errors nested as context.
    fn has_kind(&self, f: impl Fn(&ErrorKind) -> bool + Copy) -> bool {
        self.chain().any(|err| match err.own_kind() {
            ErrorKind::Nested(nested) => nested.has_kind(f),
            kind => f(kind),
        })
    }

    fn own_kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.own_kind() {
            ErrorKind::Connectivity(err) => Some(err),
            ErrorKind::Statement(err) => err.source(),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            ErrorKind::Nested(err) => err.source(),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.own_kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Connectivity(ConnectivityError),
    Statement(StatementError),
    ConsistencyFault(ConsistencyFault),
    InvalidRowState(InvalidRowState),
    InvalidSchema(InvalidSchema),
    InvalidConnectionUrl(InvalidConnectionUrl),
    TypeConversion(TypeConversionError),
    /// Context that could not be taken apart, either because it is shared
    /// or because it carries its own chain.
    Nested(Error),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Connectivity(err) => core::fmt::Display::fmt(err, f),
            Statement(err) => core::fmt::Display::fmt(err, f),
            ConsistencyFault(err) => core::fmt::Display::fmt(err, f),
            InvalidRowState(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            InvalidConnectionUrl(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            Nested(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown roster error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
