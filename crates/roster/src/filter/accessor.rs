use super::Filter;
use crate::{Entity, Record};

use chrono::NaiveDateTime;
use roster_core::{
    schema::AuditField,
    stmt::{BinaryOp, ColumnRef, OrderBy, Value},
};

use std::{fmt, marker::PhantomData};

/// Reads one typed value off a record and names the column it is stored in.
///
/// Accessors are the leaves of the filter algebra: every comparison built
/// from one evaluates in memory through `read` and in SQL through `column`.
/// Both sides of a comparison are a `T`, so the predicate and the WHERE
/// clause always compare like with like. Pattern matching is only offered
/// for text columns.
pub struct Accessor<E, T> {
    pub column: ColumnRef,
    read: fn(&Record<E>) -> T,
    _ty: PhantomData<fn() -> T>,
}

impl<E, T> Accessor<E, T> {
    pub const fn new(column: ColumnRef, read: fn(&Record<E>) -> T) -> Self {
        Self {
            column,
            read,
            _ty: PhantomData,
        }
    }

    pub fn asc(&self) -> OrderBy {
        OrderBy::asc(self.column)
    }

    pub fn desc(&self) -> OrderBy {
        OrderBy::desc(self.column)
    }

    /// The value this accessor reads off `record`.
    pub fn get(&self, record: &Record<E>) -> T {
        (self.read)(record)
    }
}

impl<E: 'static, T: Into<Value> + 'static> Accessor<E, T> {
    pub fn eq(&self, value: impl Into<T>) -> Filter<E> {
        self.compare(BinaryOp::Eq, value.into())
    }

    pub fn ne(&self, value: impl Into<T>) -> Filter<E> {
        self.compare(BinaryOp::Ne, value.into())
    }

    pub fn lt(&self, value: impl Into<T>) -> Filter<E> {
        self.compare(BinaryOp::Lt, value.into())
    }

    pub fn le(&self, value: impl Into<T>) -> Filter<E> {
        self.compare(BinaryOp::Le, value.into())
    }

    pub fn gt(&self, value: impl Into<T>) -> Filter<E> {
        self.compare(BinaryOp::Gt, value.into())
    }

    pub fn ge(&self, value: impl Into<T>) -> Filter<E> {
        self.compare(BinaryOp::Ge, value.into())
    }

    fn compare(&self, op: BinaryOp, value: T) -> Filter<E> {
        let read = self.read;
        Filter::leaf(self.column, move |record| read(record).into(), op, value.into())
    }
}

impl<E: 'static> Accessor<E, String> {
    /// `%` matches any run of characters and `_` any single one, ignoring
    /// ASCII case.
    ///
    /// Only text columns take a pattern:
    ///
    /// ```compile_fail
    /// use roster::model::Appointment;
    ///
    /// let _ = Appointment::START.like("2024-03-04%");
    /// ```
    pub fn like(&self, pattern: &str) -> Filter<E> {
        self.compare(BinaryOp::Like, pattern.to_string())
    }
}

impl<E: 'static> Accessor<E, Option<String>> {
    /// Same as [`Accessor::like`] on a required column. NULL never matches.
    pub fn like(&self, pattern: &str) -> Filter<E> {
        self.compare(BinaryOp::Like, Some(pattern.to_string()))
    }
}

impl<E: Entity> Accessor<E, Option<i32>> {
    /// The key column. NEW records have no key and match nothing.
    pub fn primary_key() -> Self {
        Self::new(ColumnRef::new(E::TABLE, E::PRIMARY_KEY), |record| {
            record.primary_key()
        })
    }
}

impl<E: Entity> Accessor<E, String> {
    pub fn created_by() -> Self {
        Self::new(audit_column::<E>(AuditField::CreatedBy), |record| {
            record.created_by().to_string()
        })
    }

    pub fn last_modified_by() -> Self {
        Self::new(audit_column::<E>(AuditField::LastModifiedBy), |record| {
            record.last_modified_by().to_string()
        })
    }
}

impl<E: Entity> Accessor<E, NaiveDateTime> {
    pub fn create_date() -> Self {
        Self::new(audit_column::<E>(AuditField::CreateDate), |record| record.create_date())
    }

    pub fn last_modified_date() -> Self {
        Self::new(audit_column::<E>(AuditField::LastModifiedDate), |record| {
            record.last_modified_date()
        })
    }
}

fn audit_column<E: Entity>(field: AuditField) -> ColumnRef {
    ColumnRef::new(E::TABLE, field.column_name())
}

impl<E, T> Clone for Accessor<E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, T> Copy for Accessor<E, T> {}

impl<E, T> fmt::Debug for Accessor<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Accessor").field(&self.column).finish()
    }
}
