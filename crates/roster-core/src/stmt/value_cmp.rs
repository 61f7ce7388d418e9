//! Ordering between values, and equality against Rust primitives.
//!
//! Ordering follows SQL rather than Rust: null is incomparable with
//! everything (including null), booleans order as the integers they are
//! stored as, and values of unrelated types do not compare.

use super::Value;

use std::cmp::Ordering;

impl Value {
    /// SQL-style comparison. `None` means the comparison is unknown, which a
    /// WHERE clause treats as not matching.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => None,
            (Value::String(lhs), Value::String(rhs)) => Some(lhs.as_bytes().cmp(rhs.as_bytes())),
            (Value::DateTime(lhs), Value::DateTime(rhs)) => Some(lhs.cmp(rhs)),
            (lhs, rhs) => Some(lhs.as_i64()?.cmp(&rhs.as_i64()?)),
        }
    }
}

macro_rules! impl_value_eq {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    matches!(self, Value::$variant(val) if val == other)
                }
            }

            impl PartialEq<Value> for $ty {
                fn eq(&self, other: &Value) -> bool {
                    other.eq(self)
                }
            }
        )*
    };
}

impl_value_eq! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    String => String,
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::String(val) if val == other)
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other.eq(self)
    }
}
