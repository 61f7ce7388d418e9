use super::Error;

/// A connection URL that names no usable database.
#[derive(Debug)]
pub(super) struct InvalidConnectionUrl {
    url: Box<str>,
    reason: Box<str>,
}

impl Error {
    pub fn invalid_connection_url(url: &str, reason: impl core::fmt::Display) -> Error {
        Error::from(super::ErrorKind::InvalidConnectionUrl(InvalidConnectionUrl {
            url: url.into(),
            reason: reason.to_string().into(),
        }))
    }

    pub fn is_invalid_connection_url(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::InvalidConnectionUrl(_)))
    }
}

impl core::fmt::Display for InvalidConnectionUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid connection URL `{}`: {}", self.url, self.reason)
    }
}
