use thiserror::Error;

/// All errors the plan compiler can report. Compilation is pure, so every
/// failure is deterministic for a given input and aborts the whole tree;
/// no partial predicate is ever returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// An `and`/`or`/`not` node (or a plan condition) held an operand
    /// that is not itself an expression.
    #[error("expected expression operand under {0:?}")]
    ExpressionExpected(&'static str),

    /// A comparison node did not have exactly two operands.
    #[error("expected a binary operation: op = {operator:?}, # of operands = {count}")]
    BinaryOperands { operator: String, count: usize },

    /// The operator code is not in the backend's operator table.
    #[error("unsupported operation {0:?}")]
    UnsupportedOperation(String),

    /// The plan response carried a filter kind outside the known set.
    #[error("unrecognized filter kind in plan response")]
    UnrecognizedFilterKind,
}

pub type Result<T> = std::result::Result<T, FilterError>;
