mod accessor;
pub use accessor::Accessor;

use crate::{Entity, Record};

use chrono::NaiveDateTime;
use roster_core::stmt::{BinaryOp, ColumnRef, Condition, Value};

use std::{fmt, sync::Arc};

/// Selects a subset of records, both in memory and in SQL.
///
/// A filter is a tree whose leaves compare one [`Accessor`] against a
/// value. The predicate ([`matches`](Filter::matches)) and the WHERE
/// condition ([`condition`](Filter::condition)) are both derived from the
/// same tree, so they cannot drift apart.
pub struct Filter<E> {
    node: Node<E>,
}

enum Node<E> {
    /// Matches everything. Renders no WHERE clause.
    All,
    Leaf(Leaf<E>),
    And(Vec<Node<E>>),
    Or(Vec<Node<E>>),
}

struct Leaf<E> {
    column: ColumnRef,
    read: Arc<dyn Fn(&Record<E>) -> Value + Send + Sync>,
    op: BinaryOp,
    value: Value,
}

impl<E> Filter<E> {
    /// Matches every record. Identity for [`and`](Filter::and), absorbing
    /// for [`or`](Filter::or).
    pub fn all() -> Self {
        Self { node: Node::All }
    }

    pub(crate) fn leaf(
        column: ColumnRef,
        read: impl Fn(&Record<E>) -> Value + Send + Sync + 'static,
        op: BinaryOp,
        value: Value,
    ) -> Self {
        Self {
            node: Node::Leaf(Leaf {
                column,
                read: Arc::new(read),
                op,
                value,
            }),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self.node, Node::All)
    }

    pub fn and(self, other: Filter<E>) -> Self {
        let node = match (self.node, other.node) {
            (Node::All, node) | (node, Node::All) => node,
            (Node::And(mut lhs), Node::And(rhs)) => {
                lhs.extend(rhs);
                Node::And(lhs)
            }
            (Node::And(mut lhs), rhs) => {
                lhs.push(rhs);
                Node::And(lhs)
            }
            (lhs, Node::And(mut rhs)) => {
                rhs.insert(0, lhs);
                Node::And(rhs)
            }
            (lhs, rhs) => Node::And(vec![lhs, rhs]),
        };
        Self { node }
    }

    pub fn or(self, other: Filter<E>) -> Self {
        let node = match (self.node, other.node) {
            (Node::All, _) | (_, Node::All) => Node::All,
            (Node::Or(mut lhs), Node::Or(rhs)) => {
                lhs.extend(rhs);
                Node::Or(lhs)
            }
            (Node::Or(mut lhs), rhs) => {
                lhs.push(rhs);
                Node::Or(lhs)
            }
            (lhs, Node::Or(mut rhs)) => {
                rhs.insert(0, lhs);
                Node::Or(rhs)
            }
            (lhs, rhs) => Node::Or(vec![lhs, rhs]),
        };
        Self { node }
    }

    /// Evaluates the filter against a record in memory.
    pub fn matches(&self, record: &Record<E>) -> bool {
        self.node.matches(record)
    }

    /// The WHERE condition, or `None` when the filter matches everything.
    pub fn condition(&self) -> Option<Condition> {
        match self.node {
            Node::All => None,
            ref node => Some(node.condition()),
        }
    }
}

impl<E: Entity> Filter<E> {
    pub fn primary_key_is(primary_key: i32) -> Self {
        Accessor::<E, Option<i32>>::primary_key().eq(primary_key)
    }

    pub fn primary_key_is_not(primary_key: i32) -> Self {
        Accessor::<E, Option<i32>>::primary_key().ne(primary_key)
    }

    pub fn created_by_is(user_name: &str) -> Self {
        Accessor::<E, String>::created_by().eq(user_name)
    }

    pub fn modified_by_is(user_name: &str) -> Self {
        Accessor::<E, String>::last_modified_by().eq(user_name)
    }

    pub fn created_before(at: NaiveDateTime) -> Self {
        Accessor::<E, NaiveDateTime>::create_date().lt(at)
    }

    pub fn created_after(at: NaiveDateTime) -> Self {
        Accessor::<E, NaiveDateTime>::create_date().gt(at)
    }

    pub fn modified_before(at: NaiveDateTime) -> Self {
        Accessor::<E, NaiveDateTime>::last_modified_date().lt(at)
    }

    pub fn modified_after(at: NaiveDateTime) -> Self {
        Accessor::<E, NaiveDateTime>::last_modified_date().gt(at)
    }
}

impl<E> Node<E> {
    fn matches(&self, record: &Record<E>) -> bool {
        match self {
            Node::All => true,
            Node::Leaf(leaf) => leaf.op.eval(&(leaf.read)(record), &leaf.value),
            Node::And(operands) => operands.iter().all(|operand| operand.matches(record)),
            Node::Or(operands) => operands.iter().any(|operand| operand.matches(record)),
        }
    }

    fn condition(&self) -> Condition {
        match self {
            Node::All => Condition::And(vec![]),
            Node::Leaf(leaf) => Condition::compare(leaf.column, leaf.op, leaf.value.clone()),
            Node::And(operands) => Condition::And(operands.iter().map(Node::condition).collect()),
            Node::Or(operands) => Condition::Or(operands.iter().map(Node::condition).collect()),
        }
    }
}

impl<E> Default for Filter<E> {
    fn default() -> Self {
        Self::all()
    }
}

impl<E> Clone for Filter<E> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<E> Clone for Node<E> {
    fn clone(&self) -> Self {
        match self {
            Node::All => Node::All,
            Node::Leaf(leaf) => Node::Leaf(Leaf {
                column: leaf.column,
                read: leaf.read.clone(),
                op: leaf.op,
                value: leaf.value.clone(),
            }),
            Node::And(operands) => Node::And(operands.clone()),
            Node::Or(operands) => Node::Or(operands.clone()),
        }
    }
}

impl<E> fmt::Debug for Filter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl<E> fmt::Debug for Node<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::All => f.write_str("All"),
            Node::Leaf(leaf) => write!(f, "{:?} {} {:?}", leaf.column, leaf.op, leaf.value),
            Node::And(operands) => f.debug_tuple("And").field(operands).finish(),
            Node::Or(operands) => f.debug_tuple("Or").field(operands).finish(),
        }
    }
}
