use super::{Delimited, Formatter, Params, Qualified, ToSql};

use crate::Select;

use roster_core::stmt::{ColumnRef, Condition, Direction, OrderBy};

/// A condition rendered against the tables of `select`.
pub(super) struct Where<'a> {
    pub(super) select: &'a Select,
    pub(super) condition: &'a Condition,

    /// Compound conditions below the top level are parenthesized.
    pub(super) nested: bool,
}

/// A column reference resolved to `"alias"."column"`.
pub(super) struct Resolved<'a> {
    pub(super) select: &'a Select,
    pub(super) column: &'a ColumnRef,
}

pub(super) struct Order<'a> {
    pub(super) select: &'a Select,
    pub(super) order_by: &'a OrderBy,
}

impl ToSql for Where<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let (operands, delimiter, empty) = match self.condition {
            Condition::Compare(expr) => {
                let column = Resolved {
                    select: self.select,
                    column: &expr.column,
                };

                let op = expr.op.to_string();
                let op = op.as_str();
                let value = &expr.value;

                fmt!(f, column " " op " " value);
                return;
            }
            Condition::And(operands) => (operands, " AND ", "1 = 1"),
            Condition::Or(operands) => (operands, " OR ", "1 = 0"),
        };

        if operands.is_empty() {
            fmt!(f, empty);
            return;
        }

        let operands = operands.iter().map(|condition| Where {
            select: self.select,
            condition,
            nested: true,
        });

        if self.nested {
            fmt!(f, "(" Delimited(operands, delimiter) ")");
        } else {
            fmt!(f, Delimited(operands, delimiter));
        }
    }
}

impl ToSql for Resolved<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self.select.resolve(self.column) {
            Ok((alias, column)) => fmt!(f, Qualified(alias, column)),
            Err(err) => f.fail(err),
        }
    }
}

impl ToSql for Order<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let column = Resolved {
            select: self.select,
            column: &self.order_by.column,
        };

        match self.order_by.direction {
            Direction::Asc => fmt!(f, column " ASC"),
            Direction::Desc => fmt!(f, column " DESC"),
        }
    }
}
