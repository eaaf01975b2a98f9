//! HTTP client for the policy engine's query-plan endpoint.

use crate::error::ClientError;
use crate::principal::{Principal, Resource};
use plan::PlanResponse;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanRequest<'a> {
    action: &'a str,
    principal: &'a Principal,
    resource: &'a Resource,
}

pub struct PlanClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlanClient {
    pub fn new(base_url: &str) -> Self {
        PlanClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Asks the policy engine which rows of `resource` the principal may
    /// `action` on, returning the query plan to apply at the store.
    pub async fn plan_resources(
        &self,
        principal: &Principal,
        resource: &Resource,
        action: &str,
    ) -> Result<PlanResponse, ClientError> {
        let url = format!("{}/api/plan/resources", self.base_url);
        debug!(%url, action, principal = %principal.id, "requesting query plan");

        let response = self
            .http
            .post(&url)
            .json(&PlanRequest {
                action,
                principal,
                resource,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = PlanClient::new("http://localhost:3592/");
        assert_eq!(client.base_url, "http://localhost:3592");
    }

    #[test]
    fn test_plan_request_wire_shape() {
        let principal = Principal::new("1").with_role("user");
        let resource = Resource::new("contact");
        let request = PlanRequest {
            action: "read",
            principal: &principal,
            resource: &resource,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "read");
        assert_eq!(json["resource"]["kind"], "contact");
    }
}
