use super::{Formatter, Params, ToSql};

use roster_core::{schema::Column, stmt::Type};

/// SQLite storage type of a column.
pub(super) struct ColumnType<'a>(pub(super) &'a Column);

impl ToSql for ColumnType<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        use std::fmt::Write;

        let column = self.0;

        if column.is_primary_key() {
            fmt!(f, "INTEGER PRIMARY KEY AUTOINCREMENT");
            return;
        }

        // SQLite keeps `VARCHAR(n)` as a declared type only; lengths are
        // enforced before statements are built.
        match (column.ty, column.max_length) {
            (Type::String, Some(max_length)) => {
                let _ = write!(f.dst, "VARCHAR({max_length})");
            }
            (Type::String, None) => fmt!(f, "TEXT"),
            (Type::Bool | Type::I32 | Type::I64, _) => fmt!(f, "INTEGER"),
            (Type::DateTime, _) => fmt!(f, "TEXT"),
        }
    }
}
