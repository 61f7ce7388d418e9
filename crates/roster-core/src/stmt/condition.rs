use super::{BinaryOp, ColumnRef, Value};

/// The SQL half of a filter: a WHERE condition with its bind values.
///
/// Bind values are emitted in depth-first, left-to-right order.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare(ExprCompare),
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

/// `column <op> value`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCompare {
    pub column: ColumnRef,
    pub op: BinaryOp,
    pub value: Value,
}

impl Condition {
    pub fn compare(column: ColumnRef, op: BinaryOp, value: impl Into<Value>) -> Self {
        Self::Compare(ExprCompare {
            column,
            op,
            value: value.into(),
        })
    }

    /// Bind values in the order their placeholders appear.
    pub fn values(&self) -> Vec<&Value> {
        let mut values = vec![];
        self.collect_values(&mut values);
        values
    }

    fn collect_values<'a>(&'a self, dst: &mut Vec<&'a Value>) {
        match self {
            Self::Compare(expr) => dst.push(&expr.value),
            Self::And(operands) | Self::Or(operands) => {
                for operand in operands {
                    operand.collect_values(dst);
                }
            }
        }
    }
}
