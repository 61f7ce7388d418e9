pub mod db;
pub use db::Db;

mod entity;
pub use entity::Entity;

mod factory;
pub use factory::{Factory, SaveOutcome};

pub mod filter;
pub use filter::{Accessor, Filter};

pub mod model;

pub mod record;
pub use record::{Actor, ChangeEvent, Record, Shared};

mod reference;
pub use reference::{Fidelity, Reference};

pub use roster_core::{
    driver::{Connection, Driver},
    stmt::{Direction, OrderBy, Value},
    Error, Result, RowState,
};
pub use roster_sql::Row;
