use crate::stmt::{Type, Value};

/// A serialized statement ready to be executed by a driver.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Runs a query and returns its rows.
    QuerySql(QuerySql),

    /// Runs an UPDATE or DELETE and returns the affected-row count.
    ExecSql(ExecSql),

    /// Runs an INSERT and returns the affected-row count together with the
    /// key the database generated.
    Insert(Insert),
}

#[derive(Debug, Clone)]
pub struct QuerySql {
    pub sql: String,
    pub params: Vec<Value>,

    /// Type of each result column, used to decode storage values.
    pub ret: Vec<Type>,
}

#[derive(Debug, Clone)]
pub struct ExecSql {
    pub sql: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Operation {
    /// SQL text of the operation.
    pub fn sql(&self) -> &str {
        match self {
            Operation::QuerySql(op) => &op.sql,
            Operation::ExecSql(op) => &op.sql,
            Operation::Insert(op) => &op.sql,
        }
    }

    pub fn params(&self) -> &[Value] {
        match self {
            Operation::QuerySql(op) => &op.params,
            Operation::ExecSql(op) => &op.params,
            Operation::Insert(op) => &op.params,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Operation::QuerySql(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Operation::Insert(_))
    }
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Operation::QuerySql(value)
    }
}

impl From<ExecSql> for Operation {
    fn from(value: ExecSql) -> Self {
        Operation::ExecSql(value)
    }
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Operation::Insert(value)
    }
}
