use super::{AuditField, Column, ColumnId};
use crate::{Error, Result};

use std::fmt;

/// A database table
#[derive(Debug)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Physical name of the table
    pub name: String,

    /// The table's columns, in declaration order
    pub columns: Vec<Column>,

    /// The single auto-increment key column
    pub primary_key: ColumnId,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct TableId(pub usize);

impl Table {
    pub fn primary_key_column(&self) -> &Column {
        &self.columns[self.primary_key.index]
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        &self.columns[id.into().index]
    }

    /// Finds a column by its logical name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn resolve_column(&self, name: &str) -> Result<&Column> {
        self.column_by_name(name).ok_or_else(|| {
            Error::invalid_schema(format!("table `{}` has no column `{name}`", self.name))
        })
    }

    pub fn audit_column(&self, field: AuditField) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.audit_field() == Some(field))
    }

    /// Columns written by an INSERT: everything but the generated key.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns
            .iter()
            .filter(|column| !column.is_primary_key())
    }

    /// Columns written by an UPDATE: everything but the key and the
    /// create-audit pair.
    pub fn updatable_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.is_updatable())
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
