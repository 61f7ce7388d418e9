use crate::{Factory, Filter, Record};

use roster_core::{
    schema::{Column, Schema, Table},
    stmt::Value,
    Connection, Result,
};
use roster_sql::{Row, Select};

use std::{fmt::Debug, sync::OnceLock};

/// Declarative description of one persisted entity.
///
/// Everything the [`Factory`] does for an entity is driven by this trait:
/// the table metadata, the query used to load it, how each column's value
/// is read off the entity and how the entity is read back out of a row.
pub trait Entity: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Physical name of the entity's table.
    const TABLE: &'static str;

    /// Logical name of the primary key column.
    const PRIMARY_KEY: &'static str;

    /// The registry the table belongs to.
    fn schema() -> Result<&'static Schema>;

    /// The query loading full records, built once.
    fn select() -> Result<&'static Select>;

    /// Value of a data or foreign key column for INSERT and UPDATE.
    ///
    /// Never called for the key or audit columns.
    fn column_value(&self, column: &Column) -> Result<Value>;

    /// Reads the entity's fields out of a row of [`select`](Entity::select),
    /// or of any query joining the table in for display.
    fn from_row(row: &Row<'_>) -> Result<Self>;

    fn table() -> Result<&'static Table> {
        Ok(Self::schema()?.resolve_table(Self::TABLE)?)
    }

    /// The filter used when a caller asks for every item.
    fn all_items() -> Filter<Self> {
        Filter::all()
    }

    /// Reason the record may not be saved, such as a duplicate unique
    /// value. Empty when there is no objection.
    fn save_conflict_message(_cx: &mut dyn Connection, _record: &Record<Self>) -> Result<String> {
        Ok(String::new())
    }

    /// Reason the record may not be deleted, such as rows still referring
    /// to it. Empty when there is no objection.
    fn delete_dependency_message(
        _cx: &mut dyn Connection,
        _record: &Record<Self>,
    ) -> Result<String> {
        Ok(String::new())
    }

    fn factory() -> Factory<Self> {
        Factory::new()
    }
}

/// Initializes `cell` on first use. A failed build is cached too, so every
/// caller sees the same error.
pub(crate) fn cached<T: Send + Sync>(
    cell: &'static OnceLock<Result<T>>,
    init: impl FnOnce() -> Result<T>,
) -> Result<&'static T> {
    cell.get_or_init(init).as_ref().map_err(Clone::clone)
}
