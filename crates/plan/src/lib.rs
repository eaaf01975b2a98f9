pub mod expr;
pub mod response;
pub mod value;

pub use expr::{Expression, LogicalOp, Operand};
pub use response::{FilterKind, PlanFilter, PlanResponse};
pub use value::Value;
