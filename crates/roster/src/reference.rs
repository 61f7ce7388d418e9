use crate::{record::Audit, Entity, Record};

use roster_core::{stmt::Value, Connection, Result};
use roster_sql::Row;

use std::fmt;

/// A lazily resolved pointer to a record of another entity.
///
/// A reference starts out as much as its source knew: nothing, a bare key,
/// the columns a join brought along, or a complete record. It can be
/// upgraded on demand through the target's factory, and upgrading never
/// changes which record it points at.
pub struct Reference<E> {
    state: State<E>,
}

enum State<E> {
    Empty,
    Key(i32),
    Partial(Box<Record<E>>),
    Full(Box<Record<E>>),
}

/// How much of the target a [`Reference`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fidelity {
    Empty,

    /// Only the primary key
    Key,

    /// The columns joined in for display, without audit data
    Partial,

    Full,
}

impl<E> Reference<E> {
    pub fn empty() -> Self {
        Self { state: State::Empty }
    }

    /// A reference to the row with the given key, not loaded yet.
    pub fn key(primary_key: i32) -> Self {
        Self {
            state: State::Key(primary_key),
        }
    }

    pub fn primary_key(&self) -> Option<i32> {
        match &self.state {
            State::Empty => None,
            State::Key(primary_key) => Some(*primary_key),
            State::Partial(record) | State::Full(record) => record.primary_key(),
        }
    }

    pub fn fidelity(&self) -> Fidelity {
        match self.state {
            State::Empty => Fidelity::Empty,
            State::Key(_) => Fidelity::Key,
            State::Partial(_) => Fidelity::Partial,
            State::Full(_) => Fidelity::Full,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    /// The loaded target, partial or full.
    pub fn partial(&self) -> Option<&Record<E>> {
        match &self.state {
            State::Partial(record) | State::Full(record) => Some(&**record),
            _ => None,
        }
    }

    pub fn full(&self) -> Option<&Record<E>> {
        match &self.state {
            State::Full(record) => Some(&**record),
            _ => None,
        }
    }

    pub fn full_mut(&mut self) -> Option<&mut Record<E>> {
        match &mut self.state {
            State::Full(record) => Some(&mut **record),
            _ => None,
        }
    }
}

impl<E: Entity> Reference<E> {
    /// Loads the target unless at least its joined columns are present.
    ///
    /// A target that no longer exists leaves the reference empty.
    pub fn ensure_partial(&mut self, cx: &mut dyn Connection) -> Result<Option<&Record<E>>> {
        if let State::Key(primary_key) = self.state {
            self.load(cx, primary_key)?;
        }
        Ok(self.partial())
    }

    /// Loads the complete target unless it is already present.
    ///
    /// A target that no longer exists leaves the reference empty.
    pub fn ensure_full(&mut self, cx: &mut dyn Connection) -> Result<Option<&Record<E>>> {
        if !matches!(self.state, State::Full(_)) {
            if let Some(primary_key) = self.primary_key() {
                self.load(cx, primary_key)?;
            }
        }
        Ok(self.full())
    }

    /// Builds the reference held by a foreign key column.
    ///
    /// When `probe` names a column the query joined in from the target and
    /// the row carries a value for it, the target is hydrated from the row.
    /// Otherwise only the key is kept.
    pub fn hydrate(primary_key: Option<i32>, row: &Row<'_>, probe: &str) -> Result<Self> {
        let Some(primary_key) = primary_key else {
            return Ok(Self::empty());
        };

        if row.is_null(probe) {
            return Ok(Self::key(primary_key));
        }

        let record = Record::hydrate(primary_key, Audit::default(), E::from_row(row)?);
        Ok(Self {
            state: State::Partial(Box::new(record)),
        })
    }

    fn load(&mut self, cx: &mut dyn Connection, primary_key: i32) -> Result<()> {
        self.state = match E::factory().load_by_primary_key(cx, primary_key)? {
            Some(record) => State::Full(Box::new(record)),
            None => {
                tracing::debug!(table = E::TABLE, primary_key, "referenced row is missing");
                State::Empty
            }
        };
        Ok(())
    }
}

impl<E> PartialEq for Reference<E> {
    /// Same target, whatever either side has loaded of it.
    fn eq(&self, other: &Self) -> bool {
        match (self.primary_key(), other.primary_key()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            (None, None) => self.is_empty() && other.is_empty(),
            _ => false,
        }
    }
}

impl<E> Default for Reference<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Clone> Clone for Reference<E> {
    fn clone(&self) -> Self {
        let state = match &self.state {
            State::Empty => State::Empty,
            State::Key(primary_key) => State::Key(*primary_key),
            State::Partial(record) => State::Partial(record.clone()),
            State::Full(record) => State::Full(record.clone()),
        };
        Self { state }
    }
}

impl<E: fmt::Debug> fmt::Debug for Reference<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Empty => f.write_str("Reference::Empty"),
            State::Key(primary_key) => write!(f, "Reference::Key({primary_key})"),
            State::Partial(record) => f.debug_tuple("Reference::Partial").field(record).finish(),
            State::Full(record) => f.debug_tuple("Reference::Full").field(record).finish(),
        }
    }
}

impl<E> From<Record<E>> for Reference<E> {
    fn from(record: Record<E>) -> Self {
        Self {
            state: State::Full(Box::new(record)),
        }
    }
}

impl<E> From<&Reference<E>> for Value {
    fn from(reference: &Reference<E>) -> Self {
        Value::from(reference.primary_key())
    }
}

impl<E> From<Reference<E>> for Value {
    fn from(reference: Reference<E>) -> Self {
        Value::from(&reference)
    }
}
