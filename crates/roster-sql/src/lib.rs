pub mod select;
pub use select::{Columns, Join, JoinKind, Row, Select, SelectBuilder};

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::Statement;
