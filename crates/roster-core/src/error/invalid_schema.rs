use super::Error;

/// Entity metadata that contradicts itself, such as a duplicate column or
/// a foreign key to an undeclared table. Raised while the registry is
/// built or looked up, never by the database.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl Error {
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        let message = message.into().into_boxed_str();
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema { message }))
    }

    pub fn is_invalid_schema(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid entity metadata: {}", self.message)
    }
}
