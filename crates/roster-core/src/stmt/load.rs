use super::Value;
use crate::{Error, Result};

use chrono::NaiveDateTime;

/// Converts a column value read from storage into a field type.
pub trait Load: Sized {
    fn load(value: Value) -> Result<Self>;
}

impl Load for Value {
    fn load(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl Load for bool {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::I32(v) => Ok(v != 0),
            Value::I64(v) => Ok(v != 0),
            _ => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl Load for i32 {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v),
            Value::I64(v) => i32::try_from(v).map_err(|_| Error::type_conversion(value, "i32")),
            _ => Err(Error::type_conversion(value, "i32")),
        }
    }
}

impl Load for i64 {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v as i64),
            Value::I64(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "i64")),
        }
    }
}

impl Load for String {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "String")),
        }
    }
}

impl Load for NaiveDateTime {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::DateTime(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "NaiveDateTime")),
        }
    }
}

impl<T: Load> Load for Option<T> {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::load(value).map(Some),
        }
    }
}
