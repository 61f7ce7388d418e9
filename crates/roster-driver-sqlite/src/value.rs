use chrono::NaiveDateTime;
use roster_core::{
    stmt::{self, Type, DATETIME_FORMAT},
    Error, Result,
};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

#[derive(Debug)]
pub struct Value(stmt::Value);

impl From<stmt::Value> for Value {
    fn from(value: stmt::Value) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> stmt::Value {
        self.0
    }

    /// Reads column `index` of `row` as a value of type `ty`.
    pub fn from_sql(row: &Row<'_>, index: usize, ty: Type) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::statement_rejected)?;

        let core_value = match value {
            SqlValue::Null => stmt::Value::Null,
            SqlValue::Integer(value) => match ty {
                Type::Bool => stmt::Value::Bool(value != 0),
                Type::I32 => i32::try_from(value)
                    .map(stmt::Value::I32)
                    .map_err(|_| Error::type_conversion(stmt::Value::I64(value), "i32"))?,
                Type::I64 => stmt::Value::I64(value),
                _ => return Err(Error::type_conversion(stmt::Value::I64(value), ty.name())),
            },
            SqlValue::Text(value) => match ty {
                Type::DateTime => NaiveDateTime::parse_from_str(&value, DATETIME_FORMAT)
                    .map(stmt::Value::datetime)
                    .map_err(|_| Error::type_conversion(stmt::Value::String(value), "NaiveDateTime"))?,
                Type::String => stmt::Value::String(value),
                _ => return Err(Error::type_conversion(stmt::Value::String(value), ty.name())),
            },
            SqlValue::Real(value) => {
                return Err(roster_core::err!("unexpected REAL value {value} for {ty}"))
            }
            SqlValue::Blob(_) => return Err(roster_core::err!("unexpected BLOB value for {ty}")),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::I32(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v as i64))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::DateTime(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.format(DATETIME_FORMAT).to_string(),
            ))),
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
