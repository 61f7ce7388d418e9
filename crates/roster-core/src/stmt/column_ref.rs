use std::fmt;

/// Names a column for a WHERE or ORDER BY clause.
///
/// The reference is resolved against a query's join tree when the
/// statement is serialized. `alias` picks one occurrence when the same
/// table is joined more than once.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Physical table name
    pub table: &'static str,

    /// Logical column name
    pub column: &'static str,

    /// Table alias, when the table appears more than once
    pub alias: Option<&'static str>,
}

impl ColumnRef {
    pub const fn new(table: &'static str, column: &'static str) -> Self {
        Self {
            table,
            column,
            alias: None,
        }
    }

    pub const fn in_alias(self, alias: &'static str) -> Self {
        Self {
            alias: Some(alias),
            ..self
        }
    }
}

impl fmt::Debug for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alias {
            Some(alias) => write!(f, "{}({}).{}", self.table, alias, self.column),
            None => write!(f, "{}.{}", self.table, self.column),
        }
    }
}
