//! Run history records and status classification (PRD-17).
//!
//! Runs are executed and owned entirely by the execution collaborator; this
//! module only interprets the snapshots it returns. Status classification
//! is total: any raw string the classifier does not recognize lands on
//! [`RunState::Unknown`] rather than an error, so a page of run history
//! never fails to render over one odd row.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Canonical states
// ---------------------------------------------------------------------------

/// Canonical lifecycle states for a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Pending,
    Running,
    Completed,
    /// Synonym some engine versions report instead of `completed`. Kept
    /// distinct so the raw vocabulary survives, but presented identically.
    Succeeded,
    Failed,
    /// Anything the classifier does not recognize.
    Unknown,
}

/// Presentation grouping for a canonical state. Rendering-only; the CSS
/// token is the single value badge styling keys off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Info,
    Active,
    Success,
    Danger,
    Muted,
}

impl RunState {
    /// Classify a raw status string from the execution collaborator.
    ///
    /// Matching trims surrounding whitespace and ignores case. Total by
    /// construction: unrecognized input maps to [`RunState::Unknown`].
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Canonical lowercase token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable label for run history rows.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }

    /// Fixed presentation category for this state.
    pub fn category(&self) -> StatusCategory {
        match self {
            Self::Pending => StatusCategory::Info,
            Self::Running => StatusCategory::Active,
            Self::Completed | Self::Succeeded => StatusCategory::Success,
            Self::Failed => StatusCategory::Danger,
            Self::Unknown => StatusCategory::Muted,
        }
    }
}

impl StatusCategory {
    /// CSS class token for status badges.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Active => "active",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Muted => "muted",
        }
    }
}

// ---------------------------------------------------------------------------
// Run records
// ---------------------------------------------------------------------------

/// One run history row as returned by the execution collaborator.
///
/// `status` stays raw so nothing is lost between fetch and display;
/// classification happens at read time via [`RunRecord::state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: DbId,
    pub workflow_id: DbId,
    pub started_at: Timestamp,
    pub status: String,
    /// Error detail carried verbatim from the engine, whatever the status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RunRecord {
    /// Canonical state for this record's raw status.
    pub fn state(&self) -> RunState {
        RunState::classify(&self.status)
    }

    /// The error detail to surface, present only when the run failed.
    /// Stale engine messages on non-failed runs are suppressed.
    pub fn failure_message(&self) -> Option<&str> {
        match self.state() {
            RunState::Failed => self.error_message.as_deref(),
            _ => None,
        }
    }
}
