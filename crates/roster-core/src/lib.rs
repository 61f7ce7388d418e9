pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError};

mod row_state;
pub use row_state::RowState;

pub mod schema;
pub use schema::Schema;

pub mod stmt;

pub type Result<T, E = Error> = core::result::Result<T, E>;
