//! Authoring session lifecycle for a single workflow draft (PRD-12).
//!
//! One operator edits one draft at a time. The session owns the draft and
//! its current stage, routes every navigation through the stage gates, and
//! is the only way to obtain a [`FinalizedWorkflow`]. Dropping the session
//! abandons the draft; nothing is persisted mid-authoring.

use crate::draft::{FinalizedWorkflow, WorkflowDraft};
use crate::error::CoreError;
use crate::stages::{can_advance, can_navigate, AuthoringStage};

/// An in-progress authoring session: one draft plus its current stage.
#[derive(Debug, Clone, Default)]
pub struct AuthoringSession {
    draft: WorkflowDraft,
    stage: AuthoringStage,
}

impl AuthoringSession {
    /// Start authoring with an empty draft at the source stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing draft, for example one restored through the JSON
    /// editor. Authoring resumes at the source stage and the forward gates
    /// re-run as usual.
    pub fn from_draft(draft: WorkflowDraft) -> Self {
        Self {
            draft,
            stage: AuthoringStage::Source,
        }
    }

    /// The stage the operator is currently on.
    pub fn stage(&self) -> AuthoringStage {
        self.stage
    }

    pub fn draft(&self) -> &WorkflowDraft {
        &self.draft
    }

    /// Field-by-field edits between navigations happen through here.
    pub fn draft_mut(&mut self) -> &mut WorkflowDraft {
        &mut self.draft
    }

    /// Move forward one stage if the current stage's gate passes.
    ///
    /// On rejection the session is untouched and the error message carries
    /// every blocking reason, joined for display.
    pub fn advance(&mut self) -> Result<AuthoringStage, CoreError> {
        let next = self
            .stage
            .next()
            .ok_or_else(|| CoreError::Validation("Already at the summary stage".to_string()))?;
        let decision = can_advance(&self.draft, self.stage);
        if !decision.allowed {
            return Err(CoreError::Validation(decision.reasons.join("; ")));
        }
        self.stage = next;
        Ok(next)
    }

    /// Move back one stage. Always allowed except at the source stage.
    pub fn back(&mut self) -> Result<AuthoringStage, CoreError> {
        let prev = self
            .stage
            .prev()
            .ok_or_else(|| CoreError::Validation("Already at the first stage".to_string()))?;
        self.stage = prev;
        Ok(prev)
    }

    /// Jump directly to `stage`. Backward is free; a forward jump must pass
    /// every intermediate gate.
    pub fn go_to(&mut self, stage: AuthoringStage) -> Result<AuthoringStage, CoreError> {
        let decision = can_navigate(&self.draft, self.stage, stage);
        if !decision.allowed {
            return Err(CoreError::Validation(decision.reasons.join("; ")));
        }
        self.stage = stage;
        Ok(stage)
    }

    /// Confirm the summary stage and produce the immutable handoff value.
    ///
    /// Fails unless the session is at [`AuthoringStage::Summary`] and the
    /// draft, as it stands now, passes every stage gate. The session itself
    /// is left untouched either way, so a rejected confirmation drops the
    /// operator back into editing.
    pub fn finalize(&self) -> Result<FinalizedWorkflow, CoreError> {
        if self.stage != AuthoringStage::Summary {
            return Err(CoreError::Validation(format!(
                "Cannot finalize: must be on the {} stage, currently on {}",
                AuthoringStage::Summary.label(),
                self.stage.label()
            )));
        }
        let decision = can_navigate(&self.draft, AuthoringStage::Source, AuthoringStage::Summary);
        if !decision.allowed {
            return Err(CoreError::Validation(decision.reasons.join("; ")));
        }
        Ok(FinalizedWorkflow::new(self.draft.clone()))
    }
}
