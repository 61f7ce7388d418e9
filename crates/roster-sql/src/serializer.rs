#[macro_use]
mod fmt;
use fmt::ToSql;

mod condition;

mod delim;
use delim::{Comma, Delimited};

mod flavor;

mod ident;
use ident::{Ident, Qualified};

mod params;
pub use params::{Params, Placeholder};

mod statement;
mod ty;

use crate::stmt::Statement;

use roster_core::{driver::Flavor, Error, Result};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// First failure met while resolving names. Serialization carries on so
    /// fragments stay simple, and the error is returned at the end.
    error: Option<Error>,
}

impl Serializer {
    /// Renders `stmt`, pushing its bind values into `params` in placeholder
    /// order.
    pub fn serialize(&self, stmt: &Statement<'_>, params: &mut impl Params) -> Result<String> {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            error: None,
        };

        stmt.to_sql(&mut fmt);

        if let Some(err) = fmt.error {
            return Err(err);
        }

        ret.push(';');
        Ok(ret)
    }
}

impl<T> Formatter<'_, T> {
    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
