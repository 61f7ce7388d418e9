mod builder;
pub use builder::{Builder, TableBuilder};

mod column;
pub use column::{AuditField, Column, ColumnCategory, ColumnId};

mod table;
pub use table::{Table, TableId};

use crate::{Error, Result};

/// The static table registry.
///
/// Built once at startup from declarative descriptors and shared read-only
/// afterwards.
#[derive(Debug, Default)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.tables.get(id.into().0).expect("invalid table ID")
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        self.table(id.table)
            .columns
            .get(id.index)
            .expect("invalid column ID")
    }

    /// Looks a table up by its physical name.
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.name.eq_ignore_ascii_case(name))
    }

    pub fn resolve_table(&self, name: &str) -> Result<&Table> {
        self.table_by_name(name)
            .ok_or_else(|| Error::invalid_schema(format!("no table named `{name}`")))
    }
}
