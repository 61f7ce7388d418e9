use super::Record;

use std::ops::{Deref, DerefMut};

/// Holds change notifications back until dropped.
///
/// Returned by [`Record::begin_change`]. Brackets nest; the outermost one
/// delivers everything buffered as a single burst, with repeated changes to
/// the same field folded into one event.
#[derive(Debug)]
pub struct ChangeScope<'a, E> {
    record: &'a mut Record<E>,
}

impl<'a, E> ChangeScope<'a, E> {
    pub(super) fn new(record: &'a mut Record<E>) -> Self {
        record.change_depth += 1;
        Self { record }
    }
}

impl<E> Deref for ChangeScope<'_, E> {
    type Target = Record<E>;

    fn deref(&self) -> &Record<E> {
        self.record
    }
}

impl<E> DerefMut for ChangeScope<'_, E> {
    fn deref_mut(&mut self) -> &mut Record<E> {
        self.record
    }
}

impl<E> Drop for ChangeScope<'_, E> {
    fn drop(&mut self) {
        self.record.change_depth -= 1;
        if self.record.change_depth == 0 {
            self.record.flush();
        }
    }
}
