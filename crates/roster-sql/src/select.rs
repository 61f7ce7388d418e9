mod builder;
pub use builder::{Columns, Join, JoinKind, SelectBuilder};

mod row;
pub use row::Row;

use roster_core::{
    schema::{ColumnId, Schema, TableId},
    stmt::{ColumnRef, Type},
    Error, Result,
};

use indexmap::IndexMap;

/// A frozen SELECT over a root table and its join tree.
///
/// Produced by [`SelectBuilder::build`]. A `Select` never changes once
/// built, so entities build theirs once and share it across threads and
/// queries.
#[derive(Debug)]
pub struct Select {
    /// Root first, then joined tables in depth-first order
    tables: Vec<SelectTable>,

    /// Result columns in output order
    columns: Vec<SelectColumn>,

    /// Lower-cased result alias to column position
    positions: IndexMap<String, usize>,
}

/// A table instance within the FROM clause.
#[derive(Debug)]
pub struct SelectTable {
    pub table: TableId,

    /// Physical table name
    pub name: String,

    /// Name the table goes by within the statement
    pub alias: String,

    /// How the table is attached to its parent. `None` for the root.
    pub join: Option<JoinClause>,

    /// Logical to physical name of every column of the table, selected or
    /// not, so WHERE clauses may use any of them.
    columns: IndexMap<String, String>,
}

#[derive(Debug)]
pub struct JoinClause {
    pub kind: JoinKind,

    /// Index of the parent within [`Select::tables`]
    pub parent: usize,

    /// Physical name of the parent's column
    pub parent_column: String,

    /// Physical name of this table's column
    pub column: String,
}

/// One result column.
#[derive(Debug)]
pub struct SelectColumn {
    /// Index of the owning table within [`Select::tables`]
    pub table: usize,

    pub column: ColumnId,

    /// Physical column name
    pub name: String,

    /// Name of the column in the result set
    pub alias: String,

    pub ty: Type,
}

impl Select {
    pub fn builder<'a>(schema: &'a Schema, table: &str) -> SelectBuilder<'a> {
        SelectBuilder::new(schema, table)
    }

    pub fn root(&self) -> &SelectTable {
        &self.tables[0]
    }

    pub fn tables(&self) -> &[SelectTable] {
        &self.tables
    }

    pub fn columns(&self) -> &[SelectColumn] {
        &self.columns
    }

    /// Result column types, in output order.
    pub fn types(&self) -> Vec<Type> {
        self.columns.iter().map(|column| column.ty).collect()
    }

    /// Position of the result column named `alias`.
    pub fn position(&self, alias: &str) -> Option<usize> {
        self.positions.get(&alias.to_ascii_lowercase()).copied()
    }

    /// Result alias of a column of the root table, if selected.
    pub fn root_alias(&self, column: ColumnId) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.table == 0 && c.column == column)
            .map(|c| c.alias.as_str())
    }

    /// Resolves a column reference to `(table alias, physical column)`.
    ///
    /// A reference without an explicit alias must match exactly one table
    /// instance in the join tree.
    pub fn resolve(&self, column: &ColumnRef) -> Result<(&str, &str)> {
        let mut candidates = self.tables.iter().filter(|table| {
            table.name.eq_ignore_ascii_case(column.table)
                && column
                    .alias
                    .map_or(true, |alias| table.alias.eq_ignore_ascii_case(alias))
        });

        let Some(table) = candidates.next() else {
            return Err(Error::invalid_statement(format!(
                "`{:?}` does not refer to a table of the query on `{}`",
                column,
                self.root().name
            )));
        };

        if candidates.next().is_some() {
            return Err(Error::invalid_statement(format!(
                "`{:?}` is ambiguous; table `{}` is joined more than once",
                column, table.name
            )));
        }

        let Some(physical) = table.columns.get(&column.column.to_ascii_lowercase()) else {
            return Err(Error::invalid_statement(format!(
                "table `{}` has no column `{}`",
                table.name, column.column
            )));
        };

        Ok((&table.alias, physical))
    }
}

impl SelectTable {
    pub fn is_root(&self) -> bool {
        self.join.is_none()
    }
}
