//! Workflow draft model and the operator JSON edit surface (PRD-12).
//!
//! A draft is the in-memory, unsaved definition of a workflow: identity
//! fields, user parameters, ordered processing steps, and the column schema
//! attached after file sampling. The authoring UI mutates drafts field by
//! field; nothing is persisted mid-authoring. The only value the persistence
//! collaborator ever receives is a [`FinalizedWorkflow`], produced by the
//! session's summary-stage confirmation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::schema_inference::ColumnSchema;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// A user-defined parameter attached to a workflow definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Identifier the execution engine exposes to step code.
    pub name: String,
    /// Default applied when a run supplies no value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Operator-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    /// A parameter is valid when its name is non-empty after trimming.
    /// Defaults and descriptions are optional in every state.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// One labeled processing step in a workflow.
///
/// `code` is an opaque payload owned by the execution engine; this crate
/// never parses or interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    pub code: String,
}

impl Step {
    /// A step is valid when both its label and its code are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.label.is_empty() && !self.code.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The in-memory model of a workflow being authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDraft {
    #[serde(default)]
    pub workflow_name: String,
    #[serde(default)]
    pub workflow_description: String,
    /// Operator the definition is filed under.
    #[serde(default)]
    pub user_id: String,
    /// Set once the upload collaborator has accepted a source file.
    #[serde(default)]
    pub is_file_uploaded: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Inferred column schema; empty until a file has been sampled.
    #[serde(default)]
    pub file_schema: Vec<ColumnSchema>,
}

impl WorkflowDraft {
    /// An empty draft, the state every authoring session begins in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the draft for the free-form JSON editor.
    pub fn to_json_string(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Internal(format!("Failed to serialize draft: {e}")))
    }

    /// Parse an operator-edited JSON document into a draft.
    ///
    /// Missing fields fall back to their empty defaults; malformed JSON or a
    /// field of the wrong shape is a validation error.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text)
            .map_err(|e| CoreError::Validation(format!("Invalid draft JSON: {e}")))
    }

    /// Replace this draft with the result of an operator JSON edit.
    ///
    /// The document is parsed in full before anything is assigned, so a
    /// rejected edit leaves the prior draft untouched.
    pub fn apply_json_edit(&mut self, text: &str) -> Result<(), CoreError> {
        *self = Self::from_json_str(text)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Finalized workflow
// ---------------------------------------------------------------------------

/// The immutable form of a confirmed draft, handed to the persistence
/// collaborator for storage and scheduling.
///
/// Only the authoring session's summary-stage confirmation
/// ([`crate::session::AuthoringSession::finalize`]) can construct one, after
/// every stage gate has passed against the final draft state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FinalizedWorkflow {
    definition: WorkflowDraft,
}

impl FinalizedWorkflow {
    pub(crate) fn new(definition: WorkflowDraft) -> Self {
        Self { definition }
    }

    /// Read access to the confirmed definition.
    pub fn definition(&self) -> &WorkflowDraft {
        &self.definition
    }
}
