//! Interprets the top-level plan filter kind and decides whether a query
//! is needed at all, and with which predicate.

use crate::error::FilterError;
use crate::fields::FieldResolver;
use crate::predicate::{Predicate, compile_predicate};
use crate::text::compile_sql;
use plan::{Expression, FilterKind, Operand, PlanFilter, Value};
use tracing::debug;

/// The three terminal outcomes of dispatching a plan filter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryScope<P> {
    /// Access is always denied; return an empty result set without
    /// touching the store.
    Empty,
    /// Access is unconditional; issue the select-all form of the query.
    Unrestricted,
    /// Apply the compiled predicate to the query.
    Restricted(P),
}

/// Dispatches a plan filter for the textual backend.
pub fn sql_scope(
    resolver: &FieldResolver,
    filter: &PlanFilter,
) -> Result<QueryScope<(String, Vec<Value>)>, FilterError> {
    scope(filter, |root| compile_sql(resolver, root))
}

/// Dispatches a plan filter for the structured backend.
pub fn predicate_scope(
    resolver: &FieldResolver,
    filter: &PlanFilter,
) -> Result<QueryScope<Predicate>, FilterError> {
    scope(filter, |root| compile_predicate(resolver, root))
}

fn scope<P>(
    filter: &PlanFilter,
    compile: impl FnOnce(Option<&Expression>) -> Result<Option<P>, FilterError>,
) -> Result<QueryScope<P>, FilterError> {
    debug!(kind = ?filter.kind, "resolving query scope");
    match filter.kind {
        FilterKind::AlwaysDenied => Ok(QueryScope::Empty),
        FilterKind::AlwaysAllowed => Ok(QueryScope::Unrestricted),
        FilterKind::Conditional => {
            let root = match &filter.condition {
                None => None,
                Some(Operand::Expression(expression)) => Some(expression.as_ref()),
                Some(_) => return Err(FilterError::ExpressionExpected("condition")),
            };
            match compile(root)? {
                None => Ok(QueryScope::Unrestricted),
                Some(predicate) => Ok(QueryScope::Restricted(predicate)),
            }
        }
        FilterKind::Unrecognized => Err(FilterError::UnrecognizedFilterKind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> FieldResolver {
        FieldResolver::new()
    }

    #[test]
    fn test_always_denied_skips_compilation() {
        let scope = sql_scope(&resolver(), &PlanFilter::always_denied()).unwrap();
        assert_eq!(scope, QueryScope::Empty);
    }

    #[test]
    fn test_always_allowed_is_unrestricted() {
        let scope = sql_scope(&resolver(), &PlanFilter::always_allowed()).unwrap();
        assert_eq!(scope, QueryScope::Unrestricted);
    }

    #[test]
    fn test_conditional_without_condition_falls_back_to_unrestricted() {
        let filter = PlanFilter {
            kind: FilterKind::Conditional,
            condition: None,
        };
        let scope = sql_scope(&resolver(), &filter).unwrap();
        assert_eq!(scope, QueryScope::Unrestricted);
    }

    #[test]
    fn test_conditional_compiles_the_condition() {
        let filter = PlanFilter::conditional(Expression::comparison(
            "eq",
            vec![
                Operand::var("request.resource.attr.ownerId"),
                Operand::val(1),
            ],
        ));
        let scope = sql_scope(&resolver(), &filter).unwrap();
        let QueryScope::Restricted((sql, args)) = scope else {
            panic!("expected a restricted scope");
        };
        assert_eq!(sql, r#""owner_id" = $1"#);
        assert_eq!(args, vec![Value::Int(1)]);
    }

    #[test]
    fn test_non_expression_condition_is_malformed() {
        let filter = PlanFilter {
            kind: FilterKind::Conditional,
            condition: Some(Operand::var("R.attr.ownerId")),
        };
        let err = sql_scope(&resolver(), &filter).unwrap_err();
        assert_eq!(err, FilterError::ExpressionExpected("condition"));
    }

    #[test]
    fn test_wire_plan_compiles_end_to_end() {
        let json = r#"{
            "kind": "KIND_CONDITIONAL",
            "condition": {
                "expression": {
                    "operator": "and",
                    "operands": [
                        {"expression": {"operator": "eq", "operands": [
                            {"variable": "request.resource.attr.active"},
                            {"value": true}
                        ]}},
                        {"expression": {"operator": "in", "operands": [
                            {"variable": "request.resource.attr.department"},
                            {"value": ["sales", "marketing"]}
                        ]}}
                    ]
                }
            }
        }"#;
        let filter: PlanFilter = serde_json::from_str(json).unwrap();
        let scope = sql_scope(&resolver(), &filter).unwrap();
        let QueryScope::Restricted((sql, args)) = scope else {
            panic!("expected a restricted scope");
        };
        assert_eq!(sql, r#"("active" = $1) AND ("department" IN $2)"#);
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_unrecognized_kind_is_fatal() {
        let filter = PlanFilter {
            kind: FilterKind::Unrecognized,
            condition: None,
        };
        let err = predicate_scope(&resolver(), &filter).unwrap_err();
        assert_eq!(err, FilterError::UnrecognizedFilterKind);
    }
}
