//! Civiflow workflow API client.
//!
//! The authoring surface in `civiflow-core` is pure; everything that
//! crosses a process boundary lives here:
//!
//! - [`WorkflowService`] — the trait the UI layer consumes: submit a
//!   finalized definition, list a workflow's runs.
//! - [`HttpWorkflowService`] — reqwest-backed production implementation.
//! - [`ServiceConfig`] — env-var configuration with local defaults.
//!
//! Calls are single-attempt and stateless; retry policy, caching, and
//! scheduling belong to the workflow API itself.

pub mod config;
pub mod http;
pub mod service;

pub use config::ServiceConfig;
pub use http::HttpWorkflowService;
pub use service::{ServiceError, WorkflowService};
