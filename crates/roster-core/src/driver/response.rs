use crate::{bail, stmt::Value, Result};

#[derive(Debug, Clone)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by a query, one value per result column
    Values(Vec<Vec<Value>>),

    /// Outcome of an INSERT
    Inserted {
        count: u64,

        /// Key generated for the new row, when the database reported one
        key: Option<i64>,
    },
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(values: Vec<Vec<Value>>) -> Self {
        Self {
            rows: Rows::Values(values),
        }
    }

    pub fn inserted(count: u64, key: Option<i64>) -> Self {
        Self {
            rows: Rows::Inserted { count, key },
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Rows::Count(count) | Rows::Inserted { count, .. } => Ok(count),
            Rows::Values(_) => bail!("expected an affected-row count, got rows"),
        }
    }

    pub fn into_values(self) -> Result<Vec<Vec<Value>>> {
        match self {
            Rows::Values(values) => Ok(values),
            _ => bail!("expected rows, got an affected-row count"),
        }
    }

    /// Affected-row count and generated key of an INSERT.
    pub fn into_inserted(self) -> Result<(u64, Option<i64>)> {
        match self {
            Rows::Inserted { count, key } => Ok((count, key)),
            Rows::Count(count) => Ok((count, None)),
            Rows::Values(_) => bail!("expected an insert outcome, got rows"),
        }
    }
}
