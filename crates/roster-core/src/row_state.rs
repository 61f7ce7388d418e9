use std::fmt;

/// Lifecycle of a record relative to persisted storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowState {
    /// Constructed in memory, never inserted.
    #[default]
    New,

    /// Hydrated from storage, or just saved, with no pending changes.
    Unmodified,

    /// Persisted, with field changes not yet written.
    Modified,

    /// Removed from storage. Terminal until explicitly reset.
    Deleted,
}

impl RowState {
    pub fn is_new(self) -> bool {
        matches!(self, RowState::New)
    }

    pub fn is_modified(self) -> bool {
        matches!(self, RowState::Modified)
    }

    pub fn is_deleted(self) -> bool {
        matches!(self, RowState::Deleted)
    }

    /// True when a row backs this record in storage.
    pub fn is_persisted(self) -> bool {
        matches!(self, RowState::Unmodified | RowState::Modified)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RowState::New => "NEW",
            RowState::Unmodified => "UNMODIFIED",
            RowState::Modified => "MODIFIED",
            RowState::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for RowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
