use std::fmt;

/// Scalar type of a column or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Stored as a small integer (0 / 1)
    Bool,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// Text of bounded or unbounded length
    String,

    /// Timestamp without time zone, second precision
    DateTime,
}

impl Type {
    pub fn is_integer(self) -> bool {
        matches!(self, Type::Bool | Type::I32 | Type::I64)
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Bool => "Bool",
            Type::I32 => "I32",
            Type::I64 => "I64",
            Type::String => "String",
            Type::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
