use super::Select;

use roster_core::{
    stmt::{Load, Value},
    Error, Result,
};

/// One result row, addressed by column alias.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    select: &'a Select,
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn new(select: &'a Select, values: &'a [Value]) -> Result<Self> {
        if values.len() != select.columns().len() {
            return Err(Error::invalid_statement(format!(
                "row has {} values but the query selects {} columns",
                values.len(),
                select.columns().len()
            )));
        }
        Ok(Self { select, values })
    }

    pub fn select(&self) -> &'a Select {
        self.select
    }

    /// True when the query selected a column named `alias`.
    pub fn contains(&self, alias: &str) -> bool {
        self.select.position(alias).is_some()
    }

    pub fn value(&self, alias: &str) -> Option<&'a Value> {
        self.select.position(alias).map(|index| &self.values[index])
    }

    /// True when the column is missing from the query or null in this row.
    pub fn is_null(&self, alias: &str) -> bool {
        self.value(alias).map_or(true, Value::is_null)
    }

    /// Reads and converts the column named `alias`.
    pub fn get<T: Load>(&self, alias: &str) -> Result<T> {
        let Some(value) = self.value(alias) else {
            return Err(Error::invalid_statement(format!(
                "query on `{}` selects no column `{alias}`",
                self.select.root().name
            )));
        };
        T::load(value.clone())
    }

    /// Like [`get`](Row::get), but yields `None` when the column is not part
    /// of the query.
    pub fn get_if_selected<T: Load>(&self, alias: &str) -> Result<Option<T>> {
        match self.value(alias) {
            Some(value) => T::load(value.clone()).map(Some),
            None => Ok(None),
        }
    }
}
