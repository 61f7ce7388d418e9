use super::ColumnRef;

/// One ORDER BY term. Ordering is applied by the database only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: ColumnRef,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl OrderBy {
    pub const fn asc(column: ColumnRef) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub const fn desc(column: ColumnRef) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}
