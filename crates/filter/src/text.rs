//! The textual backend: compiles a plan expression into a raw WHERE-clause
//! fragment with `$n` placeholders and an ordered argument list. The
//! placeholder index always equals the argument's one-based position in
//! that list, numbered left to right across the whole tree; this is a wire
//! contract with the SQL execution layer.

use crate::error::FilterError;
use crate::fields::FieldResolver;
use crate::sink::{QuerySink, compile};
use plan::{Expression, LogicalOp, Value};

#[derive(Debug, Default)]
pub struct SqlEmitter {
    args: Vec<Value>,
}

impl SqlEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the emitter, returning the normalized WHERE fragment and
    /// the bound arguments in placeholder order.
    pub fn finish(self, fragment: String) -> (String, Vec<Value>) {
        (strip_outer_parens(fragment), self.args)
    }
}

impl QuerySink for SqlEmitter {
    type Op = &'static str;
    type Predicate = String;

    fn comparison_op(&self, code: &str) -> Option<&'static str> {
        Some(match code {
            "eq" => "=",
            "ne" => "<>",
            "lt" => "<",
            "lte" => "<=",
            "gt" => ">",
            "gte" => ">=",
            "add" => "+",
            "sub" => "-",
            "mult" => "*",
            "div" => "/",
            "mod" => "%",
            "in" => "IN",
            _ => return None,
        })
    }

    fn column(&mut self, name: &str) -> String {
        format!("\"{name}\"")
    }

    fn value(&mut self, value: Value) -> String {
        self.args.push(value);
        format!("${}", self.args.len())
    }

    fn compare(&mut self, left: String, op: &'static str, right: String) -> String {
        format!("({left} {op} {right})")
    }

    fn connect(&mut self, op: LogicalOp, operands: Vec<String>) -> String {
        let token = match op {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        };
        let mut out = String::from("(");
        for (i, fragment) in operands.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(token);
                out.push(' ');
            }
            out.push_str(fragment);
        }
        out.push(')');
        out
    }

    fn negate(&mut self, operand: String) -> String {
        format!("(NOT {operand})")
    }
}

/// Compiles an expression tree into `(where_clause, args)`; `None` when
/// the root is absent.
pub fn compile_sql(
    resolver: &FieldResolver,
    root: Option<&Expression>,
) -> Result<Option<(String, Vec<Value>)>, FilterError> {
    let mut sink = SqlEmitter::new();
    match compile(&mut sink, resolver, root)? {
        None => Ok(None),
        Some(fragment) => Ok(Some(sink.finish(fragment))),
    }
}

/// Strips the redundant parenthesis pair wrapping the whole fragment, and
/// only that pair: the consuming WHERE clause supplies its own grouping.
/// The pair is removed only when the paren at index 0 closes at the very
/// last byte.
fn strip_outer_parens(fragment: String) -> String {
    let bytes = fragment.as_bytes();
    if bytes.first() != Some(&b'(') || bytes.last() != Some(&b')') {
        return fragment;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 && i != bytes.len() - 1 {
                    return fragment;
                }
            }
            _ => {}
        }
    }
    fragment[1..fragment.len() - 1].to_string()
}
