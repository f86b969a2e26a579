//! Civiflow domain core: workflow authoring for open-data datasets.
//!
//! This crate holds the pure domain logic behind the workflow authoring
//! surface; nothing in it performs I/O:
//!
//! - [`draft`] — the [`WorkflowDraft`] model, its parameters and steps,
//!   and the operator JSON edit surface.
//! - [`schema_inference`] — per-column type inference over uploaded-file
//!   samples, plus operator type overrides.
//! - [`stages`] — the five authoring stages and the forward-gating rules
//!   ([`can_advance`], [`can_navigate`]).
//! - [`session`] — the [`AuthoringSession`] lifecycle, ending in a
//!   [`FinalizedWorkflow`] handoff.
//! - [`runs`] — run history records and total status classification.
//!
//! Everything here is synchronous and side-effect free; the collaborator
//! boundaries (upload, persistence, execution) live in `civiflow-client`.

pub mod draft;
pub mod error;
pub mod runs;
pub mod schema_inference;
pub mod session;
pub mod stages;
pub mod types;

pub use draft::{FinalizedWorkflow, Parameter, Step, WorkflowDraft};
pub use error::CoreError;
pub use runs::{RunRecord, RunState, StatusCategory};
pub use schema_inference::{
    apply_type_override, infer_schema, ColumnSchema, ColumnType, MAX_SAMPLE_VALUES, TYPE_PRIORITY,
};
pub use session::AuthoringSession;
pub use stages::{can_advance, can_navigate, AuthoringStage, GateDecision, STAGES, STAGE_COUNT};
pub use types::{DbId, Timestamp};
