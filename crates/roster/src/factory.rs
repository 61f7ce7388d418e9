use crate::{
    record::{self, Audit},
    Actor, Entity, Filter, Record,
};

use roster_core::{
    driver::operation,
    schema::{AuditField, Column},
    stmt::{Load, OrderBy, Type, Value},
    Connection, Error, Result, RowState,
};
use roster_sql::{stmt, Row, Serializer, Statement};

use std::{fmt, marker::PhantomData};

/// Loads and persists records of one entity.
///
/// Factories carry no state; every operation borrows the connection it
/// runs on and the record it changes. Holding `&mut Record` (or the lock
/// of a [`Shared`](crate::Shared) record) for the duration of a save or
/// delete keeps the state check and the statement together.
pub struct Factory<E> {
    _entity: PhantomData<fn() -> E>,
}

/// What [`Factory::save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,

    /// The record had no changes and the save was not forced.
    Unchanged,
}

impl<E: Entity> Factory<E> {
    pub const fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }

    /// A NEW record holding the entity's defaults.
    pub fn create_new(&self, actor: &Actor) -> Record<E> {
        Record::new(actor)
    }

    pub fn load(&self, cx: &mut dyn Connection, filter: &Filter<E>) -> Result<Vec<Record<E>>> {
        self.load_ordered(cx, filter, &[])
    }

    pub fn load_ordered(
        &self,
        cx: &mut dyn Connection,
        filter: &Filter<E>,
        order_by: &[OrderBy],
    ) -> Result<Vec<Record<E>>> {
        self.query(cx, filter, order_by, None)
    }

    pub fn load_first(
        &self,
        cx: &mut dyn Connection,
        filter: &Filter<E>,
        order_by: &[OrderBy],
    ) -> Result<Option<Record<E>>> {
        Ok(self.query(cx, filter, order_by, Some(1))?.into_iter().next())
    }

    pub fn load_by_primary_key(
        &self,
        cx: &mut dyn Connection,
        primary_key: i32,
    ) -> Result<Option<Record<E>>> {
        self.load_first(cx, &Filter::primary_key_is(primary_key), &[])
    }

    /// Number of rows matching `filter`.
    pub fn count(&self, cx: &mut dyn Connection, filter: &Filter<E>) -> Result<u64> {
        let select = E::select()?;
        let condition = filter.condition();
        let query = Statement::query(select).filter(condition.as_ref());

        let (sql, params) = serialize(cx, &Statement::Count(query))?;
        tracing::debug!(table = E::TABLE, sql = %sql, params = params.len(), "count");

        let rows = cx
            .exec(
                operation::QuerySql {
                    sql,
                    params,
                    ret: vec![Type::I64],
                }
                .into(),
            )?
            .rows
            .into_values()?;

        let Some(value) = rows.into_iter().next().and_then(|row| row.into_iter().next()) else {
            return Err(Error::consistency_fault("COUNT(*) returned no row"));
        };

        let count: i64 = Load::load(value)?;
        u64::try_from(count)
            .map_err(|_| Error::consistency_fault(format!("negative row count {count}")))
    }

    /// Re-reads a persisted record from storage.
    ///
    /// Pending changes are discarded. Subscribers see a single
    /// [`Hydrated`](crate::ChangeEvent::Hydrated) event.
    pub fn refresh(&self, cx: &mut dyn Connection, record: &mut Record<E>) -> Result<()> {
        let Some(primary_key) = record.primary_key().filter(|_| record.is_persisted()) else {
            return Err(Error::invalid_row_state("refresh", record.row_state()));
        };

        let Some(fresh) = self.load_by_primary_key(cx, primary_key)? else {
            return Err(Error::consistency_fault(format!(
                "{} {primary_key} no longer exists",
                E::TABLE
            )));
        };

        let mut scope = record.begin_change();
        scope.rehydrate(fresh);
        Ok(())
    }

    /// Hydrates a record from a row of the entity's query.
    pub fn from_row(&self, row: &Row<'_>) -> Result<Record<E>> {
        let table = E::table()?;
        let Some(alias) = row.select().root_alias(table.primary_key) else {
            return Err(Error::invalid_statement(format!(
                "query on `{}` does not select its primary key",
                table.name
            )));
        };

        Ok(Record::hydrate(
            row.get(alias)?,
            Audit::from_row(table, row)?,
            E::from_row(row)?,
        ))
    }

    /// Writes the record according to its state.
    ///
    /// NEW records are inserted and MODIFIED ones updated. UNMODIFIED
    /// records are only written when `force` is set. Saving a DELETED
    /// record is an error.
    pub fn save(
        &self,
        cx: &mut dyn Connection,
        record: &mut Record<E>,
        actor: &Actor,
        force: bool,
    ) -> Result<SaveOutcome> {
        match record.row_state() {
            RowState::New => {
                self.insert(cx, record, actor)?;
                Ok(SaveOutcome::Inserted)
            }
            RowState::Unmodified if !force => Ok(SaveOutcome::Unchanged),
            RowState::Unmodified | RowState::Modified => {
                self.update(cx, record, actor)?;
                Ok(SaveOutcome::Updated)
            }
            RowState::Deleted => Err(Error::invalid_row_state("save", RowState::Deleted)),
        }
    }

    /// Deletes a persisted record, leaving it DELETED.
    pub fn delete(&self, cx: &mut dyn Connection, record: &mut Record<E>) -> Result<()> {
        let table = E::table()?;
        let Some(primary_key) = record.primary_key().filter(|_| record.is_persisted()) else {
            return Err(Error::invalid_row_state("delete", record.row_state()));
        };

        let mut scope = record.begin_change();

        let stmt = Statement::from(stmt::Delete {
            table,
            key: Value::from(primary_key),
        });
        let (sql, params) = serialize(cx, &stmt)?;
        tracing::debug!(table = E::TABLE, sql = %sql, primary_key, "delete");

        let count = cx.exec(operation::ExecSql { sql, params }.into())?.rows.into_count()?;
        if count == 0 {
            return Err(Error::consistency_fault(format!(
                "{} {primary_key} was already gone",
                E::TABLE
            )));
        }

        scope.mark_deleted();
        Ok(())
    }

    pub fn save_conflict_message(
        &self,
        cx: &mut dyn Connection,
        record: &Record<E>,
    ) -> Result<String> {
        E::save_conflict_message(cx, record)
    }

    pub fn delete_dependency_message(
        &self,
        cx: &mut dyn Connection,
        record: &Record<E>,
    ) -> Result<String> {
        E::delete_dependency_message(cx, record)
    }

    fn query(
        &self,
        cx: &mut dyn Connection,
        filter: &Filter<E>,
        order_by: &[OrderBy],
        limit: Option<u64>,
    ) -> Result<Vec<Record<E>>> {
        let select = E::select()?;
        let condition = filter.condition();

        let mut query = Statement::query(select)
            .filter(condition.as_ref())
            .order_by(order_by);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let (sql, params) = serialize(cx, &Statement::Query(query))?;
        tracing::debug!(table = E::TABLE, sql = %sql, params = params.len(), "load");

        let rows = cx
            .exec(
                operation::QuerySql {
                    sql,
                    params,
                    ret: select.types(),
                }
                .into(),
            )?
            .rows
            .into_values()?;

        rows.iter()
            .map(|values| self.from_row(&Row::new(select, values)?))
            .collect()
    }

    fn insert(&self, cx: &mut dyn Connection, record: &mut Record<E>, actor: &Actor) -> Result<()> {
        let table = E::table()?;
        let audit = Audit::stamp(actor);

        let values = table
            .insertable_columns()
            .map(|column| {
                let value = match column.audit_field() {
                    Some(field) => audit.value(field),
                    None => record.column_value(column)?,
                };
                check_length::<E>(column, &value)?;
                Ok((column, value))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut scope = record.begin_change();

        let (sql, params) = serialize(cx, &stmt::Insert { table, values }.into())?;
        tracing::debug!(table = E::TABLE, sql = %sql, params = params.len(), "insert");

        let (count, key) = cx
            .exec(operation::Insert { sql, params }.into())?
            .rows
            .into_inserted()?;

        if count != 1 {
            return Err(Error::consistency_fault(format!(
                "insert into {} affected {count} rows",
                E::TABLE
            )));
        }

        let Some(key) = key else {
            return Err(Error::consistency_fault(format!(
                "insert into {} produced no key",
                E::TABLE
            )));
        };

        let primary_key = i32::try_from(key).map_err(|_| {
            Error::consistency_fault(format!("generated key {key} for {} is out of range", E::TABLE))
        })?;

        scope.mark_inserted(primary_key, audit);
        drop(scope);
        self.reload_joined(cx, record)
    }

    fn update(&self, cx: &mut dyn Connection, record: &mut Record<E>, actor: &Actor) -> Result<()> {
        let table = E::table()?;
        let Some(primary_key) = record.primary_key() else {
            return Err(Error::consistency_fault(format!(
                "{} record in state {} has no key",
                E::TABLE,
                record.row_state()
            )));
        };

        let at = record::now();
        let assignments = table
            .updatable_columns()
            .map(|column| {
                let value = match column.audit_field() {
                    Some(AuditField::LastModifiedDate) => Value::datetime(at),
                    Some(AuditField::LastModifiedBy) => Value::from(actor.name()),
                    Some(field) => record.audit().value(field),
                    None => record.column_value(column)?,
                };
                check_length::<E>(column, &value)?;
                Ok((column, value))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut scope = record.begin_change();

        let stmt = Statement::from(stmt::Update {
            table,
            assignments,
            key: Value::from(primary_key),
        });
        let (sql, params) = serialize(cx, &stmt)?;
        tracing::debug!(table = E::TABLE, sql = %sql, params = params.len(), "update");

        let count = cx.exec(operation::ExecSql { sql, params }.into())?.rows.into_count()?;
        if count == 0 {
            return Err(Error::consistency_fault(format!(
                "update of {} {primary_key} matched no row",
                E::TABLE
            )));
        }

        scope.mark_updated(actor, at);
        drop(scope);
        self.reload_joined(cx, record)
    }

    /// Reads a just written record back through the entity's query when
    /// that query joins other tables, so references set by key alone carry
    /// the joined data a load would have given them.
    fn reload_joined(&self, cx: &mut dyn Connection, record: &mut Record<E>) -> Result<()> {
        if E::select()?.tables().len() < 2 {
            return Ok(());
        }
        let Some(primary_key) = record.primary_key() else {
            return Ok(());
        };

        let Some(fresh) = self.load_by_primary_key(cx, primary_key)? else {
            return Err(Error::consistency_fault(format!(
                "{} {primary_key} vanished after it was written",
                E::TABLE
            )));
        };

        if !record.adopt_joined(fresh) {
            tracing::debug!(table = E::TABLE, primary_key, "stored row differs; keeping saved data");
        }
        Ok(())
    }
}

/// SQLite keeps `VARCHAR(n)` as a declared type only, so declared lengths
/// are checked here before a statement is built.
fn check_length<E: Entity>(column: &Column, value: &Value) -> Result<()> {
    let (Some(max_length), Value::String(text)) = (column.max_length, value) else {
        return Ok(());
    };

    let length = text.chars().count();
    if length > max_length {
        return Err(Error::invalid_statement(format!(
            "{}.{} holds {length} characters, at most {max_length} allowed",
            E::TABLE,
            column.name
        )));
    }
    Ok(())
}

fn serialize(cx: &dyn Connection, stmt: &Statement<'_>) -> Result<(String, Vec<Value>)> {
    let mut params = vec![];
    let sql = Serializer::for_capability(cx.capability()).serialize(stmt, &mut params)?;
    Ok((sql, params))
}

impl<E: Entity> Default for Factory<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Factory<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Factory<E> {}

impl<E> fmt::Debug for Factory<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}
