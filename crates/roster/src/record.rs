mod audit;
pub use audit::Audit;

mod event;
pub use event::ChangeEvent;

mod scope;
pub use scope::ChangeScope;

use crate::Entity;

use chrono::{NaiveDateTime, Timelike, Utc};
use roster_core::{schema::AuditField, stmt::Value, Error, Result, RowState};

use std::{
    fmt,
    ops::Deref,
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc, Mutex,
    },
};

/// Key of a record that has not been inserted yet.
const UNASSIGNED: i32 = i32::MIN;

/// A record shared between threads. Lock it for the whole of any
/// read-check-write sequence, such as a save.
pub type Shared<E> = Arc<Mutex<Record<E>>>;

/// The user on whose behalf records are created and modified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor(String);

/// An entity together with its key, audit trail and lifecycle state.
///
/// Field data is read through `Deref`. Writes go through [`Record::set`]
/// (or the typed setters each entity defines on top of it) so that the
/// lifecycle state, audit fields and subscribers stay in step.
pub struct Record<E> {
    primary_key: i32,
    audit: Audit,
    row_state: RowState,
    data: E,

    /// Data and audit as last accepted from storage
    original: Option<(E, Audit)>,

    observers: Vec<Sender<ChangeEvent>>,

    /// Depth of nested change brackets
    change_depth: usize,

    /// Events held back by an open change bracket
    pending: Vec<ChangeEvent>,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<E: Default> Record<E> {
    /// A NEW record holding the entity's defaults.
    pub fn new(actor: &Actor) -> Self {
        Self::with_data(actor, E::default())
    }
}

impl<E> Record<E> {
    /// A NEW record holding `data`, stamped as created by `actor` now.
    pub fn with_data(actor: &Actor, data: E) -> Self {
        Self {
            primary_key: UNASSIGNED,
            audit: Audit::stamp(actor),
            row_state: RowState::New,
            data,
            original: None,
            observers: vec![],
            change_depth: 0,
            pending: vec![],
        }
    }

    /// A record as read from storage. Starts UNMODIFIED and notifies no one.
    pub(crate) fn hydrate(primary_key: i32, audit: Audit, data: E) -> Self
    where
        E: Clone,
    {
        Self {
            primary_key,
            original: Some((data.clone(), audit.clone())),
            audit,
            row_state: RowState::Unmodified,
            data,
            observers: vec![],
            change_depth: 0,
            pending: vec![],
        }
    }

    /// The generated key, once the record has been inserted.
    pub fn primary_key(&self) -> Option<i32> {
        (self.primary_key != UNASSIGNED).then_some(self.primary_key)
    }

    pub fn audit(&self) -> &Audit {
        &self.audit
    }

    pub fn create_date(&self) -> NaiveDateTime {
        self.audit.create_date
    }

    pub fn created_by(&self) -> &str {
        &self.audit.created_by
    }

    pub fn last_modified_date(&self) -> NaiveDateTime {
        self.audit.last_modified_date
    }

    pub fn last_modified_by(&self) -> &str {
        &self.audit.last_modified_by
    }

    pub fn row_state(&self) -> RowState {
        self.row_state
    }

    pub fn is_new(&self) -> bool {
        self.row_state.is_new()
    }

    pub fn is_modified(&self) -> bool {
        self.row_state.is_modified()
    }

    pub fn is_deleted(&self) -> bool {
        self.row_state.is_deleted()
    }

    /// True while a row backs the record in storage.
    pub fn is_persisted(&self) -> bool {
        self.row_state.is_persisted()
    }

    pub fn data(&self) -> &E {
        &self.data
    }

    /// Registers a new subscriber. Subscribers whose receiver has been
    /// dropped are forgotten on the next delivery.
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel();
        self.observers.push(tx);
        rx
    }

    /// Opens a change bracket. Events are delivered when the outermost
    /// bracket is dropped.
    pub fn begin_change(&mut self) -> ChangeScope<'_, E> {
        ChangeScope::new(self)
    }

    /// Assigns `value` to the field `name` selected by `field`.
    ///
    /// Returns `false` without touching anything when the field already
    /// holds an equal value. Otherwise refreshes the modification audit
    /// fields and moves an UNMODIFIED record to MODIFIED. DELETED records
    /// cannot be changed.
    pub fn set<V>(
        &mut self,
        actor: &Actor,
        name: &'static str,
        field: impl FnOnce(&mut E) -> &mut V,
        value: V,
    ) -> Result<bool>
    where
        V: PartialEq + Clone + Into<Value>,
    {
        if self.row_state.is_deleted() {
            return Err(Error::invalid_row_state("modify", self.row_state));
        }

        let slot = field(&mut self.data);
        if *slot == value {
            return Ok(false);
        }

        let old = std::mem::replace(slot, value.clone());

        let mut scope = self.begin_change();
        scope.emit(ChangeEvent::Property {
            name,
            old: old.into(),
            new: value.into(),
        });
        scope.touch(actor, now());

        if scope.row_state == RowState::Unmodified {
            scope.set_row_state(RowState::Modified);
        }

        Ok(true)
    }

    /// Takes a DELETED record back to NEW so it can be inserted again.
    ///
    /// Clears the key and re-stamps the audit fields. Returns `false`, doing
    /// nothing, for records in any other state.
    pub fn reset_row_state(&mut self, actor: &Actor) -> bool {
        if !self.row_state.is_deleted() {
            return false;
        }

        let mut scope = self.begin_change();
        scope.set_primary_key(UNASSIGNED);
        scope.set_audit(Audit::stamp(actor));
        scope.original = None;
        scope.set_row_state(RowState::New);
        true
    }

    pub(crate) fn mark_inserted(&mut self, primary_key: i32, audit: Audit)
    where
        E: Clone,
    {
        self.set_primary_key(primary_key);
        self.set_audit(audit);
        self.accept();
    }

    pub(crate) fn mark_updated(&mut self, actor: &Actor, at: NaiveDateTime)
    where
        E: Clone,
    {
        self.touch(actor, at);
        self.accept();
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.original = None;
        self.set_row_state(RowState::Deleted);
    }

    /// Replaces everything with a freshly loaded copy. Subscribers see a
    /// single [`ChangeEvent::Hydrated`].
    pub(crate) fn rehydrate(&mut self, fresh: Record<E>) {
        let Record {
            primary_key,
            audit,
            row_state,
            data,
            original,
            ..
        } = fresh;

        self.primary_key = primary_key;
        self.audit = audit;
        self.row_state = row_state;
        self.data = data;
        self.original = original;
        self.emit(ChangeEvent::Hydrated);
    }

    /// Takes the data of a freshly loaded copy of the same stored row,
    /// bringing in whatever the load joined for its references. Nothing
    /// a subscriber can observe changes, so no events are sent.
    pub(crate) fn adopt_joined(&mut self, fresh: Record<E>) -> bool
    where
        E: Clone + PartialEq,
    {
        if fresh.primary_key != self.primary_key || fresh.data != self.data {
            return false;
        }

        if let Some((data, _)) = &mut self.original {
            *data = fresh.data.clone();
        }
        self.data = fresh.data;
        true
    }

    /// Current state becomes the accepted storage state.
    fn accept(&mut self)
    where
        E: Clone,
    {
        self.original = Some((self.data.clone(), self.audit.clone()));
        self.set_row_state(RowState::Unmodified);
    }

    fn touch(&mut self, actor: &Actor, at: NaiveDateTime) {
        let mut audit = self.audit.clone();
        audit.last_modified_date = at;
        audit.last_modified_by = actor.name().to_string();
        self.set_audit(audit);
    }

    fn set_primary_key(&mut self, primary_key: i32) {
        if self.primary_key == primary_key {
            return;
        }

        let old = self.primary_key();
        self.primary_key = primary_key;
        self.emit(ChangeEvent::Property {
            name: "primaryKey",
            old: old.into(),
            new: self.primary_key().into(),
        });
    }

    fn set_audit(&mut self, audit: Audit) {
        let old = std::mem::replace(&mut self.audit, audit);

        for field in AuditField::ALL {
            let (old, new) = (old.value(field), self.audit.value(field));
            if old != new {
                self.emit(ChangeEvent::Property {
                    name: field.column_name(),
                    old,
                    new,
                });
            }
        }
    }

    fn set_row_state(&mut self, row_state: RowState) {
        if self.row_state == row_state {
            return;
        }

        tracing::trace!(from = %self.row_state, to = %row_state, "row state transition");

        let old = std::mem::replace(&mut self.row_state, row_state);
        self.emit(ChangeEvent::RowState {
            old,
            new: row_state,
        });
    }

    fn emit(&mut self, event: ChangeEvent) {
        if self.change_depth > 0 {
            if self.pending.iter_mut().any(|pending| pending.merge(&event)) {
                self.pending.retain(|pending| !pending.is_noop());
            } else {
                self.pending.push(event);
            }
        } else {
            self.deliver(event);
        }
    }

    fn flush(&mut self) {
        for event in std::mem::take(&mut self.pending) {
            self.deliver(event);
        }
    }

    fn deliver(&mut self, event: ChangeEvent) {
        self.observers
            .retain(|observer| observer.send(event.clone()).is_ok());
    }
}

impl<E: Entity> Record<E> {
    /// Restores the data and audit fields last accepted from storage,
    /// taking a MODIFIED record back to UNMODIFIED. Returns `false` for
    /// records in any other state.
    pub fn reject_changes(&mut self) -> Result<bool> {
        if !self.row_state.is_modified() {
            return Ok(false);
        }

        let Some((data, audit)) = self.original.clone() else {
            return Ok(false);
        };

        let table = E::table()?;
        let mut scope = self.begin_change();

        for column in &table.columns {
            if column.is_primary_key() || column.is_audit() {
                continue;
            }

            let (old, new) = (scope.data.column_value(column)?, data.column_value(column)?);
            if old != new {
                scope.emit(ChangeEvent::Property {
                    name: column.name.as_str(),
                    old,
                    new,
                });
            }
        }

        scope.data = data;
        scope.set_audit(audit);
        scope.set_row_state(RowState::Unmodified);
        Ok(true)
    }
}

impl<E> Deref for Record<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.data
    }
}

impl<E: Clone> Clone for Record<E> {
    /// Copies the record's state. Subscribers stay with the original.
    fn clone(&self) -> Self {
        Self {
            primary_key: self.primary_key,
            audit: self.audit.clone(),
            row_state: self.row_state,
            data: self.data.clone(),
            original: self.original.clone(),
            observers: vec![],
            change_depth: 0,
            pending: vec![],
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Record<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("primary_key", &self.primary_key())
            .field("row_state", &self.row_state)
            .field("data", &self.data)
            .field("audit", &self.audit)
            .finish()
    }
}

/// The current time at the precision storage keeps.
pub(crate) fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}
