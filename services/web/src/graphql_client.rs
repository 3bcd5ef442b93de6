//! Client for the backend GraphQL API
//!
//! Every service goes through [`GraphQlClient`]; the HTTP implementation
//! posts `{query, variables}` as JSON and decodes `{data, errors}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    config::GraphQlConfig,
    error::ClientError,
    models::{Customer, User},
};

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Union of every root field the front-end selects
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphQlData {
    pub customers: Option<Vec<Customer>>,
    pub customer: Option<Customer>,
    pub add_customer: Option<Customer>,
    pub update_customer: Option<Customer>,
    pub delete_customer: Option<bool>,
    pub users: Option<Vec<User>>,
    pub user: Option<User>,
    pub user_by_id: Option<User>,
    pub add_user: Option<User>,
    pub update_user_role: Option<User>,
    pub update_user_last_login: Option<User>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GraphQlResponse {
    pub data: Option<GraphQlData>,
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    pub fn data(self) -> GraphQlData {
        self.data.unwrap_or_default()
    }

    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }

        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[async_trait]
pub trait GraphQlClient: Send + Sync {
    /// Execute a query or mutation; GraphQL-level errors come back in the
    /// response, transport failures as `Err`
    async fn execute(&self, query: &str, variables: Option<Value>) -> Result<GraphQlResponse, ClientError>;
}

/// GraphQL client over HTTP
pub struct HttpGraphQlClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGraphQlClient {
    pub fn new(config: &GraphQlConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl GraphQlClient for HttpGraphQlClient {
    async fn execute(&self, query: &str, variables: Option<Value>) -> Result<GraphQlResponse, ClientError> {
        debug!("Executing GraphQL query: {}", query);

        let response: GraphQlResponse = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(message) = response.error_message() {
            error!("GraphQL errors: {}", message);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_data_and_errors() {
        let body = r#"{
            "data": {"deleteCustomer": null, "customers": [{"id": 1, "firstName": "John"}]},
            "errors": [{"message": "Error deleting customer: Customer with id 9 not found", "locations": []}]
        }"#;

        let response: GraphQlResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.error_message().unwrap(),
            "Error deleting customer: Customer with id 9 not found"
        );

        let data = response.data();
        assert!(data.delete_customer.is_none());
        assert_eq!(data.customers.unwrap()[0].first_name, "John");
    }

    #[test]
    fn test_null_data_is_empty() {
        let response: GraphQlResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(response.error_message().is_none());
        assert!(response.data().customer.is_none());
    }

    #[test]
    fn test_request_omits_missing_variables() {
        let body = serde_json::to_value(GraphQlRequest {
            query: "{ customers { id } }",
            variables: None,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"query": "{ customers { id } }"}));
    }
}
