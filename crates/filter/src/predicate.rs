//! The structured backend: compiles a plan expression into a composable
//! `Predicate` AST. The AST carries no SQL text of its own; rendering is
//! a separate, dialect-aware pass (see `render`), so the same predicate
//! can target any supported dialect.

use crate::error::FilterError;
use crate::fields::FieldResolver;
use crate::sink::{QuerySink, compile};
use plan::{Expression, LogicalOp, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    In,
}

impl CompareOp {
    pub(crate) fn token(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Add => "+",
            CompareOp::Sub => "-",
            CompareOp::Mult => "*",
            CompareOp::Div => "/",
            CompareOp::Mod => "%",
            CompareOp::In => "IN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A resolved column reference.
    Column(String),
    /// A literal to be bound as a query parameter at render time.
    Value(Value),
    Compare {
        left: Box<Predicate>,
        op: CompareOp,
        right: Box<Predicate>,
    },
    /// n-ary AND.
    All(Vec<Predicate>),
    /// n-ary OR.
    Any(Vec<Predicate>),
    Not(Box<Predicate>),
}

pub struct PredicateEmitter;

impl QuerySink for PredicateEmitter {
    type Op = CompareOp;
    type Predicate = Predicate;

    fn comparison_op(&self, code: &str) -> Option<CompareOp> {
        Some(match code {
            "eq" => CompareOp::Eq,
            "ne" => CompareOp::Ne,
            "lt" => CompareOp::Lt,
            "lte" => CompareOp::Lte,
            "gt" => CompareOp::Gt,
            "gte" => CompareOp::Gte,
            "add" => CompareOp::Add,
            "sub" => CompareOp::Sub,
            "mult" => CompareOp::Mult,
            "div" => CompareOp::Div,
            "mod" => CompareOp::Mod,
            "in" => CompareOp::In,
            _ => return None,
        })
    }

    fn column(&mut self, name: &str) -> Predicate {
        Predicate::Column(name.to_string())
    }

    fn value(&mut self, value: Value) -> Predicate {
        Predicate::Value(value)
    }

    fn compare(&mut self, left: Predicate, op: CompareOp, right: Predicate) -> Predicate {
        Predicate::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    fn connect(&mut self, op: LogicalOp, operands: Vec<Predicate>) -> Predicate {
        match op {
            LogicalOp::And => Predicate::All(operands),
            LogicalOp::Or => Predicate::Any(operands),
        }
    }

    fn negate(&mut self, operand: Predicate) -> Predicate {
        Predicate::Not(Box::new(operand))
    }
}

/// Compiles an expression tree into a `Predicate`; `None` when the root
/// is absent.
pub fn compile_predicate(
    resolver: &FieldResolver,
    root: Option<&Expression>,
) -> Result<Option<Predicate>, FilterError> {
    let mut sink = PredicateEmitter;
    compile(&mut sink, resolver, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan::Operand;

    #[test]
    fn test_compiles_to_composable_ast() {
        let expression = Expression::and(vec![
            Operand::expr(Expression::comparison(
                "eq",
                vec![Operand::var("R.attr.active"), Operand::val(true)],
            )),
            Operand::expr(Expression::not(Operand::expr(Expression::comparison(
                "eq",
                vec![Operand::var("R.attr.ownerId"), Operand::val(7)],
            )))),
        ]);
        let predicate = compile_predicate(&FieldResolver::new(), Some(&expression))
            .unwrap()
            .unwrap();
        assert_eq!(
            predicate,
            Predicate::All(vec![
                Predicate::Compare {
                    left: Box::new(Predicate::Column("active".to_string())),
                    op: CompareOp::Eq,
                    right: Box::new(Predicate::Value(Value::Boolean(true))),
                },
                Predicate::Not(Box::new(Predicate::Compare {
                    left: Box::new(Predicate::Column("owner_id".to_string())),
                    op: CompareOp::Eq,
                    right: Box::new(Predicate::Value(Value::Int(7))),
                })),
            ])
        );
    }

    #[test]
    fn test_errors_match_textual_backend() {
        let expression = Expression::comparison("xor", vec![Operand::var("R.attr.a"), Operand::val(1)]);
        let err = compile_predicate(&FieldResolver::new(), Some(&expression)).unwrap_err();
        assert_eq!(err, FilterError::UnsupportedOperation("xor".to_string()));
    }
}
