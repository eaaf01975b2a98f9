//! Renders a structured `Predicate` into dialect-specific SQL.

use crate::dialect::Dialect;
use crate::predicate::Predicate;
use plan::Value;

/// A node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the SQL string and the bound parameters during rendering,
/// and provides access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }
}

impl Render for Predicate {
    fn render(&self, r: &mut Renderer) {
        match self {
            Predicate::Column(name) => {
                r.sql.push_str(&r.dialect.quote_identifier(name));
            }
            Predicate::Value(value) => r.add_param(value.clone()),
            Predicate::Compare { left, op, right } => {
                r.sql.push('(');
                left.render(r);
                r.sql.push(' ');
                r.sql.push_str(op.token());
                r.sql.push(' ');
                right.render(r);
                r.sql.push(')');
            }
            Predicate::All(parts) => render_group(r, "AND", parts),
            Predicate::Any(parts) => render_group(r, "OR", parts),
            Predicate::Not(inner) => {
                r.sql.push_str("(NOT ");
                inner.render(r);
                r.sql.push(')');
            }
        }
    }
}

fn render_group(r: &mut Renderer, token: &str, parts: &[Predicate]) {
    r.sql.push('(');
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            r.sql.push(' ');
            r.sql.push_str(token);
            r.sql.push(' ');
        }
        part.render(r);
    }
    r.sql.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySql, Postgres};
    use crate::fields::FieldResolver;
    use crate::predicate::compile_predicate;
    use plan::{Expression, Operand};

    fn sample_predicate() -> Predicate {
        let expression = Expression::or(vec![
            Operand::expr(Expression::comparison(
                "eq",
                vec![Operand::var("R.attr.department"), Operand::val("sales")],
            )),
            Operand::expr(Expression::comparison(
                "gte",
                vec![Operand::var("R.attr.ownerId"), Operand::val(10)],
            )),
        ]);
        compile_predicate(&FieldResolver::new(), Some(&expression))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_render_postgres() {
        let predicate = sample_predicate();
        let mut renderer = Renderer::new(&Postgres);
        predicate.render(&mut renderer);
        let (sql, params) = renderer.finish();
        assert_eq!(
            sql,
            r#"(("department" = $1) OR ("owner_id" >= $2))"#
        );
        assert_eq!(params, vec![Value::from("sales"), Value::Int(10)]);
    }

    #[test]
    fn test_render_mysql() {
        let predicate = sample_predicate();
        let mut renderer = Renderer::new(&MySql);
        predicate.render(&mut renderer);
        let (sql, params) = renderer.finish();
        assert_eq!(sql, "((`department` = ?) OR (`owner_id` >= ?))");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_predicate_is_reusable_across_dialects() {
        let predicate = sample_predicate();

        let mut pg = Renderer::new(&Postgres);
        predicate.render(&mut pg);
        let mut my = Renderer::new(&MySql);
        predicate.render(&mut my);

        assert_eq!(pg.params, my.params);
        assert_ne!(pg.sql, my.sql);
    }
}
