//! HTTP implementation of the workflow service boundary (PRD-18).
//!
//! Wraps the workflow API's REST surface using [`reqwest`]. The API wraps
//! every successful body in a `{ "data": ... }` envelope; errors come back
//! as plain non-2xx responses whose body text is surfaced verbatim.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use civiflow_core::{DbId, FinalizedWorkflow, RunRecord};

use crate::config::ServiceConfig;
use crate::service::{ServiceError, WorkflowService};

/// HTTP client for a single workflow API instance.
pub struct HttpWorkflowService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

/// Success envelope the workflow API wraps every response body in.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Body of a successful workflow submission.
#[derive(Debug, Deserialize)]
struct CreatedWorkflow {
    /// Identifier the API minted for the stored definition.
    id: DbId,
}

impl HttpWorkflowService {
    /// Create a client from configuration.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling across services).
    pub fn with_client(client: reqwest::Client, config: ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`ServiceError::Api`] carrying the status
    /// and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Parse a successful response body out of its `data` envelope.
    async fn parse_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let response = Self::ensure_success(response).await?;
        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl WorkflowService for HttpWorkflowService {
    async fn submit_workflow(
        &self,
        workflow: &FinalizedWorkflow,
    ) -> Result<DbId, ServiceError> {
        let response = self
            .client
            .post(format!("{}/workflows", self.base_url))
            .timeout(self.timeout)
            .json(workflow)
            .send()
            .await
            .map_err(|e| ServiceError::Connection(e.to_string()))?;

        let created: CreatedWorkflow = Self::parse_envelope(response).await?;
        info!(
            workflow_id = created.id,
            workflow_name = %workflow.definition().workflow_name,
            "Submitted workflow definition"
        );
        Ok(created.id)
    }

    async fn list_runs(&self, workflow_id: DbId) -> Result<Vec<RunRecord>, ServiceError> {
        let response = self
            .client
            .get(format!("{}/workflows/{}/runs", self.base_url, workflow_id))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ServiceError::Connection(e.to_string()))?;

        let runs: Vec<RunRecord> = Self::parse_envelope(response).await?;
        info!(workflow_id, count = runs.len(), "Fetched run history");
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civiflow_core::RunState;
    use serde_json::json;

    // -- envelope parsing --

    #[test]
    fn created_workflow_parses_from_the_data_envelope() {
        let envelope: DataEnvelope<CreatedWorkflow> = serde_json::from_value(json!({
            "data": { "id": 512 }
        }))
        .unwrap();
        assert_eq!(envelope.data.id, 512);
    }

    #[test]
    fn run_history_parses_from_the_data_envelope() {
        let envelope: DataEnvelope<Vec<RunRecord>> = serde_json::from_value(json!({
            "data": [
                {
                    "id": 9,
                    "workflow_id": 512,
                    "started_at": "2026-03-02T12:00:00Z",
                    "status": "completed",
                },
                {
                    "id": 8,
                    "workflow_id": 512,
                    "started_at": "2026-03-01T12:00:00Z",
                    "status": "failed",
                    "error_message": "step 2 timed out",
                },
            ]
        }))
        .unwrap();

        let runs = envelope.data;
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].state(), RunState::Completed);
        assert_eq!(runs[1].failure_message(), Some("step 2 timed out"));
    }

    #[test]
    fn envelope_without_data_key_is_a_decode_error_shape() {
        let result: Result<DataEnvelope<CreatedWorkflow>, _> =
            serde_json::from_value(json!({ "id": 512 }));
        assert!(result.is_err());
    }

    // -- construction --

    #[test]
    fn with_client_keeps_the_configured_base_url() {
        let service = HttpWorkflowService::with_client(
            reqwest::Client::new(),
            ServiceConfig {
                base_url: "http://workflows:9000/api/v1".to_string(),
                request_timeout_secs: 3,
            },
        );
        assert_eq!(service.base_url, "http://workflows:9000/api/v1");
        assert_eq!(service.timeout, Duration::from_secs(3));
    }
}
