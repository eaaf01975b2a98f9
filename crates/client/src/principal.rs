use serde::Serialize;
use std::collections::HashMap;

/// The principal on whose behalf a query plan is requested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub attr: HashMap<String, serde_json::Value>,
}

impl Principal {
    pub fn new(id: &str) -> Self {
        Principal {
            id: id.to_string(),
            roles: Vec::new(),
            attr: HashMap::new(),
        }
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.roles.push(role.to_string());
        self
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attr.insert(key.to_string(), value.into());
        self
    }
}

/// The resource kind the plan is requested for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub kind: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub attr: HashMap<String, serde_json::Value>,
}

impl Resource {
    pub fn new(kind: &str) -> Self {
        Resource {
            kind: kind.to_string(),
            attr: HashMap::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attr.insert(key.to_string(), value.into());
        self
    }
}
