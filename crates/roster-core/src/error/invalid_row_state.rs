use super::Error;
use crate::RowState;

#[derive(Debug)]
pub(super) struct InvalidRowState {
    operation: &'static str,
    state: RowState,
}

impl core::fmt::Display for InvalidRowState {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid row state: cannot {} a record in state {}",
            self.operation, self.state
        )
    }
}

impl Error {
    /// The operation is not allowed for a record in `state`.
    pub fn invalid_row_state(operation: &'static str, state: RowState) -> Error {
        Error::from(super::ErrorKind::InvalidRowState(InvalidRowState {
            operation,
            state,
        }))
    }

    pub fn is_state_error(&self) -> bool {
        self.has_kind(|kind| matches!(kind, super::ErrorKind::InvalidRowState(_)))
    }
}
