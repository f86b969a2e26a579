//! The workflow service boundary (PRD-18).
//!
//! Authoring hands finished definitions to, and reads run history from, a
//! separate workflow API. This module defines that boundary as a trait so
//! the UI layer and tests can swap in doubles; the production
//! implementation is [`crate::http::HttpWorkflowService`].

use async_trait::async_trait;
use civiflow_core::{DbId, FinalizedWorkflow, RunRecord};

/// Errors surfaced by workflow service calls.
///
/// Calls are single-attempt: no retry, no backoff. A failure is terminal
/// for that call and carries a human-readable message; callers re-invoke if
/// the operator asks again.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request never completed (network, DNS, TLS, timeout).
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The workflow API answered with a non-2xx status.
    #[error("Workflow API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text, kept for display.
        message: String,
    },

    /// The response arrived but its body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Operations the authoring surface consumes from the workflow API.
#[async_trait]
pub trait WorkflowService: Send + Sync {
    /// Hand a confirmed definition over for storage and scheduling.
    /// Returns the identifier the API minted for it.
    async fn submit_workflow(
        &self,
        workflow: &FinalizedWorkflow,
    ) -> Result<DbId, ServiceError>;

    /// Fetch the run history for one workflow, newest first as the API
    /// returns it. Rows arrive with raw status strings; classification is
    /// the caller's concern.
    async fn list_runs(&self, workflow_id: DbId) -> Result<Vec<RunRecord>, ServiceError>;
}
