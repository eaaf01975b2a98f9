//! The single recursive walk over a plan expression tree, parameterized
//! over a backend sink. The textual and structured backends are two
//! instantiations of this one algorithm; they differ only in how each
//! node's output is materialized.

use crate::error::FilterError;
use crate::fields::FieldResolver;
use plan::{Expression, LogicalOp, Operand, Value};

/// A backend for the plan compiler.
///
/// `Op` is the backend's comparison-operator token and `Predicate` the
/// fragment type compiled nodes produce. `comparison_op` is the backend's
/// operator table: a pure lookup whose miss means the operation is
/// unsupported.
pub trait QuerySink {
    type Op: Copy;
    type Predicate;

    fn comparison_op(&self, code: &str) -> Option<Self::Op>;
    fn column(&mut self, name: &str) -> Self::Predicate;
    fn value(&mut self, value: Value) -> Self::Predicate;
    fn compare(
        &mut self,
        left: Self::Predicate,
        op: Self::Op,
        right: Self::Predicate,
    ) -> Self::Predicate;
    fn connect(&mut self, op: LogicalOp, operands: Vec<Self::Predicate>) -> Self::Predicate;
    fn negate(&mut self, operand: Self::Predicate) -> Self::Predicate;
}

/// Compiles a plan expression tree into a backend predicate.
///
/// An absent root is the "no predicate" sentinel and yields `Ok(None)`,
/// never an error. Any malformed node aborts the whole compilation.
pub fn compile<S: QuerySink>(
    sink: &mut S,
    resolver: &FieldResolver,
    root: Option<&Expression>,
) -> Result<Option<S::Predicate>, FilterError> {
    match root {
        None => Ok(None),
        Some(expression) => compile_expr(sink, resolver, expression).map(Some),
    }
}

fn compile_expr<S: QuerySink>(
    sink: &mut S,
    resolver: &FieldResolver,
    expression: &Expression,
) -> Result<S::Predicate, FilterError> {
    match expression {
        Expression::Logical { op, operands } => {
            let mut parts = Vec::with_capacity(operands.len());
            for operand in operands {
                let Operand::Expression(inner) = operand else {
                    return Err(FilterError::ExpressionExpected(op.code()));
                };
                parts.push(compile_expr(sink, resolver, inner)?);
            }
            Ok(sink.connect(*op, parts))
        }
        Expression::Not { operands } => match operands.as_slice() {
            [Operand::Expression(inner)] => {
                let compiled = compile_expr(sink, resolver, inner)?;
                Ok(sink.negate(compiled))
            }
            _ => Err(FilterError::ExpressionExpected("not")),
        },
        Expression::Comparison { op, operands } => {
            if operands.len() != 2 {
                return Err(FilterError::BinaryOperands {
                    operator: op.clone(),
                    count: operands.len(),
                });
            }
            let token = sink
                .comparison_op(op)
                .ok_or_else(|| FilterError::UnsupportedOperation(op.clone()))?;
            let left = compile_operand(sink, resolver, &operands[0])?;
            let right = compile_operand(sink, resolver, &operands[1])?;
            Ok(sink.compare(left, token, right))
        }
    }
}

fn compile_operand<S: QuerySink>(
    sink: &mut S,
    resolver: &FieldResolver,
    operand: &Operand,
) -> Result<S::Predicate, FilterError> {
    Ok(match operand {
        Operand::Expression(inner) => compile_expr(sink, resolver, inner)?,
        Operand::Variable(path) => {
            let column = resolver.resolve(path);
            sink.column(&column)
        }
        Operand::Value(value) => sink.value(value.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::PredicateEmitter;
    use crate::text::SqlEmitter;

    const OPERATOR_CODES: [&str; 12] = [
        "eq", "ne", "lt", "lte", "gt", "gte", "add", "sub", "mult", "div", "mod", "in",
    ];

    // The two backend operator tables are keyed by the identical code
    // set; a code present in one but not the other is a defect.
    #[test]
    fn test_operator_tables_stay_in_lock_step() {
        let text = SqlEmitter::new();
        let structured = PredicateEmitter;
        for code in OPERATOR_CODES {
            assert!(text.comparison_op(code).is_some(), "textual table misses {code}");
            assert!(
                structured.comparison_op(code).is_some(),
                "structured table misses {code}"
            );
        }
        assert!(text.comparison_op("xor").is_none());
        assert!(structured.comparison_op("xor").is_none());
    }

    #[test]
    fn test_nil_root_compiles_to_no_predicate() {
        let resolver = FieldResolver::new();
        let mut sink = SqlEmitter::new();
        let compiled = compile(&mut sink, &resolver, None).unwrap();
        assert!(compiled.is_none());
    }
}
