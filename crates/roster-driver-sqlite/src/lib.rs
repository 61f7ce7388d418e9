mod value;
pub(crate) use value::Value;

use roster_core::{
    driver::{
        operation::{ExecSql, Insert, QuerySql},
        Capability, Driver, Operation, Response,
    },
    schema::{Schema, Table},
    Error, Result,
};
use roster_sql::{Serializer, Statement};
use rusqlite::{Connection as RusqliteConnection, ErrorCode};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL
    ///
    /// `sqlite::memory:` opens a private in-memory database; any other path
    /// names a database file.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url =
            Url::parse(&url_str).map_err(|err| Error::invalid_connection_url(&url_str, err))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(
                &url_str,
                format_args!("expected the `sqlite` scheme, found `{}`", url.scheme()),
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else if url.path().is_empty() {
            Err(Error::invalid_connection_url(&url_str, "no database file named"))
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    fn connect(&self) -> Result<Box<dyn roster_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::connectivity)?;
        Self::init(connection)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!(path = %path.as_ref().display(), "opening sqlite database");

        let connection = RusqliteConnection::open(path).map_err(Error::connectivity)?;
        Self::init(connection)
    }

    fn init(connection: RusqliteConnection) -> Result<Self> {
        connection
            .pragma_update(None, "foreign_keys", true)
            .map_err(Error::connectivity)?;
        Ok(Self { connection })
    }

    fn query(&mut self, op: QuerySql) -> Result<Response> {
        let mut stmt = self
            .connection
            .prepare_cached(&op.sql)
            .map_err(Error::statement_rejected)?;

        if stmt.column_count() != op.ret.len() {
            return Err(Error::invalid_statement(format!(
                "query returns {} columns but {} types were given",
                stmt.column_count(),
                op.ret.len()
            )));
        }

        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();
        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(map_exec_err)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(op.ret.len());

                    for (index, ty) in op.ret.iter().enumerate() {
                        items.push(Value::from_sql(row, index, *ty)?.into_inner());
                    }

                    ret.push(items);
                }
                Ok(None) => break,
                Err(err) => return Err(map_exec_err(err)),
            }
        }

        Ok(Response::values(ret))
    }

    fn execute(&mut self, sql: &str, params: Vec<roster_core::stmt::Value>) -> Result<u64> {
        let mut stmt = self
            .connection
            .prepare_cached(sql)
            .map_err(Error::statement_rejected)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();
        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(map_exec_err)?;

        Ok(count as u64)
    }

    fn create_table(&mut self, schema: &Schema, table: &Table) -> Result<()> {
        let mut params = vec![];
        let sql = Serializer::sqlite()
            .serialize(&Statement::create_table(schema, table), &mut params)?;
        debug_assert!(params.is_empty());

        tracing::debug!(table = %table.name, "creating table");

        self.connection
            .execute(&sql, [])
            .map_err(Error::statement_rejected)?;
        Ok(())
    }
}

impl roster_core::driver::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(op) => self.query(op),
            Operation::ExecSql(ExecSql { sql, params }) => {
                let count = self.execute(&sql, params)?;
                Ok(Response::count(count))
            }
            Operation::Insert(Insert { sql, params }) => {
                let count = self.execute(&sql, params)?;
                let key = (count > 0).then(|| self.connection.last_insert_rowid());
                Ok(Response::inserted(count, key))
            }
        }
    }

    fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        for table in &schema.tables {
            self.create_table(schema, table)?;
        }

        Ok(())
    }
}

/// Failures while running a prepared statement. Losing the database file
/// or its lock is a connectivity problem; everything else, constraint
/// violations included, is the statement being refused.
fn map_exec_err(err: rusqlite::Error) -> Error {
    match err.sqlite_error_code() {
        Some(
            ErrorCode::CannotOpen
            | ErrorCode::NotADatabase
            | ErrorCode::SystemIoFailure
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::DatabaseCorrupt,
        ) => Error::connectivity(err),
        _ => Error::statement_rejected(err),
    }
}
