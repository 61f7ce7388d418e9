mod column_ref;
pub use column_ref::ColumnRef;

mod condition;
pub use condition::{Condition, ExprCompare};

mod like;
pub use like::like;

mod load;
pub use load::Load;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod ty;
pub use ty::Type;

mod value;
pub use value::{Value, DATETIME_FORMAT};

mod value_cmp;
