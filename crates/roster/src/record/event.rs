use roster_core::{stmt::Value, RowState};

/// A change to a record, delivered to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A key, audit or data field changed.
    Property {
        name: &'static str,
        old: Value,
        new: Value,
    },

    RowState {
        old: RowState,
        new: RowState,
    },

    /// The record was re-read from storage. Replaces every per-field event
    /// the reload would otherwise have produced.
    Hydrated,
}

impl ChangeEvent {
    /// Field name the event is about. `"rowState"` for state transitions.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            ChangeEvent::Property { name, .. } => Some(name),
            ChangeEvent::RowState { .. } => Some("rowState"),
            ChangeEvent::Hydrated => None,
        }
    }

    /// Folds `later` into `self` when both concern the same field.
    pub(super) fn merge(&mut self, later: &ChangeEvent) -> bool {
        match (self, later) {
            (
                ChangeEvent::Property { name, new, .. },
                ChangeEvent::Property {
                    name: later_name,
                    new: later_new,
                    ..
                },
            ) if *name == *later_name => {
                *new = later_new.clone();
                true
            }
            (ChangeEvent::RowState { new, .. }, ChangeEvent::RowState { new: later_new, .. }) => {
                *new = *later_new;
                true
            }
            (ChangeEvent::Hydrated, ChangeEvent::Hydrated) => true,
            _ => false,
        }
    }

    /// A merged event whose value ended where it started.
    pub(super) fn is_noop(&self) -> bool {
        match self {
            ChangeEvent::Property { old, new, .. } => old == new,
            ChangeEvent::RowState { old, new } => old == new,
            ChangeEvent::Hydrated => false,
        }
    }
}
