use crate::Select;

use roster_core::{
    schema::{Column, Schema, Table},
    stmt::{Condition, OrderBy, Value},
};

/// A statement the serializer can render.
#[derive(Debug, Clone)]
pub enum Statement<'a> {
    /// `SELECT <columns> FROM <joins> [WHERE] [ORDER BY] [LIMIT]`
    Query(Query<'a>),

    /// `SELECT COUNT(*) FROM <joins> [WHERE]`
    Count(Query<'a>),

    Insert(Insert<'a>),
    Update(Update<'a>),
    Delete(Delete<'a>),
    CreateTable(CreateTable<'a>),
}

#[derive(Debug, Clone)]
pub struct Query<'a> {
    pub select: &'a Select,
    pub filter: Option<&'a Condition>,
    pub order_by: &'a [OrderBy],
    pub limit: Option<u64>,
}

/// `INSERT INTO <table> (<columns>) VALUES (<values>)`
#[derive(Debug, Clone)]
pub struct Insert<'a> {
    pub table: &'a Table,
    pub values: Vec<(&'a Column, Value)>,
}

/// `UPDATE <table> SET <assignments> WHERE <pk> = <key>`
#[derive(Debug, Clone)]
pub struct Update<'a> {
    pub table: &'a Table,
    pub assignments: Vec<(&'a Column, Value)>,
    pub key: Value,
}

/// `DELETE FROM <table> WHERE <pk> = <key>`
#[derive(Debug, Clone)]
pub struct Delete<'a> {
    pub table: &'a Table,
    pub key: Value,
}

#[derive(Debug, Clone)]
pub struct CreateTable<'a> {
    /// Resolves foreign key targets
    pub schema: &'a Schema,
    pub table: &'a Table,
}

impl<'a> Statement<'a> {
    pub fn query(select: &'a Select) -> Query<'a> {
        Query {
            select,
            filter: None,
            order_by: &[],
            limit: None,
        }
    }

    pub fn create_table(schema: &'a Schema, table: &'a Table) -> Self {
        Statement::CreateTable(CreateTable { schema, table })
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Query(_) | Statement::Count(_))
    }
}

impl<'a> Query<'a> {
    pub fn filter(mut self, filter: Option<&'a Condition>) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, order_by: &'a [OrderBy]) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<'a> From<Query<'a>> for Statement<'a> {
    fn from(value: Query<'a>) -> Self {
        Statement::Query(value)
    }
}

impl<'a> From<Insert<'a>> for Statement<'a> {
    fn from(value: Insert<'a>) -> Self {
        Statement::Insert(value)
    }
}

impl<'a> From<Update<'a>> for Statement<'a> {
    fn from(value: Update<'a>) -> Self {
        Statement::Update(value)
    }
}

impl<'a> From<Delete<'a>> for Statement<'a> {
    fn from(value: Delete<'a>) -> Self {
        Statement::Delete(value)
    }
}
