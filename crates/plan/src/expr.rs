//! The expression tree a policy engine emits inside a conditional query
//! plan. The wire form is `{"operator": ..., "operands": [...]}` with
//! operands tagged as `expression`, `variable` or `value`; `and`, `or`
//! and `not` are mapped onto their own variants so the compiler can match
//! on node kind instead of re-inspecting operator strings.

use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// The operator code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// An n-ary `and`/`or` over sub-expressions.
    Logical { op: LogicalOp, operands: Vec<Operand> },
    /// A negation; logically unary, but the operand list is kept as
    /// received so a malformed plan is reported by the compiler rather
    /// than rejected at parse time.
    Not { operands: Vec<Operand> },
    /// Everything else: a binary comparison or arithmetic operation.
    Comparison { op: String, operands: Vec<Operand> },
}

impl Expression {
    pub fn and(operands: Vec<Operand>) -> Self {
        Expression::Logical {
            op: LogicalOp::And,
            operands,
        }
    }

    pub fn or(operands: Vec<Operand>) -> Self {
        Expression::Logical {
            op: LogicalOp::Or,
            operands,
        }
    }

    pub fn not(operand: Operand) -> Self {
        Expression::Not {
            operands: vec![operand],
        }
    }

    pub fn comparison(op: &str, operands: Vec<Operand>) -> Self {
        Expression::Comparison {
            op: op.to_string(),
            operands,
        }
    }

    fn operator(&self) -> &str {
        match self {
            Expression::Logical { op, .. } => op.code(),
            Expression::Not { .. } => "not",
            Expression::Comparison { op, .. } => op,
        }
    }

    fn operands(&self) -> &[Operand] {
        match self {
            Expression::Logical { operands, .. }
            | Expression::Not { operands }
            | Expression::Comparison { operands, .. } => operands,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    Expression(Box<Expression>),
    Variable(String),
    Value(Value),
}

impl Operand {
    pub fn expr(expression: Expression) -> Self {
        Operand::Expression(Box::new(expression))
    }

    pub fn var(path: &str) -> Self {
        Operand::Variable(path.to_string())
    }

    pub fn val(value: impl Into<Value>) -> Self {
        Operand::Value(value.into())
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Operand::Expression(expression) => Some(expression),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct WireExpression {
    operator: String,
    #[serde(default)]
    operands: Vec<Operand>,
}

#[derive(Serialize)]
struct WireExpressionRef<'a> {
    operator: &'a str,
    operands: &'a [Operand],
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireExpression::deserialize(deserializer)?;
        Ok(match wire.operator.as_str() {
            "and" => Expression::Logical {
                op: LogicalOp::And,
                operands: wire.operands,
            },
            "or" => Expression::Logical {
                op: LogicalOp::Or,
                operands: wire.operands,
            },
            "not" => Expression::Not {
                operands: wire.operands,
            },
            _ => Expression::Comparison {
                op: wire.operator,
                operands: wire.operands,
            },
        })
    }
}

impl Serialize for Expression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireExpressionRef {
            operator: self.operator(),
            operands: self.operands(),
        }
        .serialize(serializer)
    }
}
