use super::Error;

/// A state-changing statement succeeded but its outcome contradicts the
/// in-memory record: wrong affected-row count, no generated key, or a row
/// that vanished between the write and the follow-up read.
#[derive(Debug)]
pub(super) struct ConsistencyFault {
    message: Box<str>,
}

impl core::fmt::Display for ConsistencyFault {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "consistency fault: {}", self.message)
    }
}

impl Error {
    pub fn consistency_fault(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ConsistencyFault(ConsistencyFault {
            message: message.into().into(),
        }))
    }

    pub fn is_consistency_fault(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::ConsistencyFault(_)))
    }
}
