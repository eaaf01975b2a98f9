//! The query plan response returned by the policy engine for a
//! "which rows may this principal access" request.

use crate::expr::{Expression, Operand};
use serde::{Deserialize, Serialize};

/// Top-level classification of a plan response.
///
/// Anything outside the three known kinds deserializes to `Unrecognized`
/// so the dispatcher can reject it with a proper error instead of serde
/// failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    #[serde(rename = "KIND_ALWAYS_ALLOWED", alias = "ALWAYS_ALLOWED")]
    AlwaysAllowed,
    #[serde(rename = "KIND_ALWAYS_DENIED", alias = "ALWAYS_DENIED")]
    AlwaysDenied,
    #[serde(rename = "KIND_CONDITIONAL", alias = "CONDITIONAL")]
    Conditional,
    #[serde(other, rename = "KIND_UNSPECIFIED")]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFilter {
    pub kind: FilterKind,
    /// Present only for `Conditional` plans; on the wire the condition is
    /// an operand wrapping the root expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Operand>,
}

impl PlanFilter {
    pub fn always_allowed() -> Self {
        PlanFilter {
            kind: FilterKind::AlwaysAllowed,
            condition: None,
        }
    }

    pub fn always_denied() -> Self {
        PlanFilter {
            kind: FilterKind::AlwaysDenied,
            condition: None,
        }
    }

    pub fn conditional(expression: Expression) -> Self {
        PlanFilter {
            kind: FilterKind::Conditional,
            condition: Some(Operand::expr(expression)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub filter: PlanFilter,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub resource_kind: Option<String>,
    #[serde(default)]
    pub policy_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Operand;

    #[test]
    fn test_parse_conditional_response() {
        let json = r#"{
            "requestId": "1",
            "action": "read",
            "resourceKind": "contact",
            "filter": {
                "kind": "KIND_CONDITIONAL",
                "condition": {
                    "expression": {
                        "operator": "eq",
                        "operands": [
                            {"variable": "request.resource.attr.ownerId"},
                            {"value": 1}
                        ]
                    }
                }
            }
        }"#;
        let response: PlanResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.filter.kind, FilterKind::Conditional);
        let condition = response.filter.condition.unwrap();
        assert!(matches!(condition, Operand::Expression(_)));
    }

    #[test]
    fn test_parse_unconditional_kinds() {
        let allowed: PlanFilter =
            serde_json::from_str(r#"{"kind": "KIND_ALWAYS_ALLOWED"}"#).unwrap();
        assert_eq!(allowed.kind, FilterKind::AlwaysAllowed);
        assert!(allowed.condition.is_none());

        let denied: PlanFilter = serde_json::from_str(r#"{"kind": "ALWAYS_DENIED"}"#).unwrap();
        assert_eq!(denied.kind, FilterKind::AlwaysDenied);
    }

    #[test]
    fn test_unknown_kind_is_unrecognized() {
        let filter: PlanFilter = serde_json::from_str(r#"{"kind": "KIND_BOGUS"}"#).unwrap();
        assert_eq!(filter.kind, FilterKind::Unrecognized);
    }
}
