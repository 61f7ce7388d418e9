use super::{like, Value};

use std::{cmp::Ordering, fmt};

/// Comparison operator of a filter leaf.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl BinaryOp {
    pub fn is_eq(self) -> bool {
        matches!(self, Self::Eq)
    }

    pub fn is_ne(self) -> bool {
        matches!(self, Self::Ne)
    }

    pub fn is_like(self) -> bool {
        matches!(self, Self::Like)
    }

    /// Evaluates `lhs <op> rhs` the way the database would.
    ///
    /// Any comparison involving null is unknown and therefore false.
    pub fn eval(self, lhs: &Value, rhs: &Value) -> bool {
        if let Self::Like = self {
            return match (lhs, rhs) {
                (Value::String(value), Value::String(pattern)) => like(value, pattern),
                _ => false,
            };
        }

        let Some(ordering) = lhs.compare(rhs) else {
            return false;
        };

        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
            Self::Like => unreachable!(),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;

        match self {
            Eq => "=".fmt(f),
            Ne => "<>".fmt(f),
            Lt => "<".fmt(f),
            Le => "<=".fmt(f),
            Gt => ">".fmt(f),
            Ge => ">=".fmt(f),
            Like => "LIKE".fmt(f),
        }
    }
}

impl fmt::Debug for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
