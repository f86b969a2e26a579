//! Authoring stage definitions and forward-gating rules (PRD-12).
//!
//! The five-stage authoring sequence is described as explicit, ordered data:
//! each stage owns a pure predicate over the draft, and the gate functions
//! do nothing but evaluate those predicates. Gates apply to forward movement
//! only; moving backward is always allowed so an operator can revisit and
//! fix earlier stages.

use serde::{Deserialize, Serialize};

use crate::draft::WorkflowDraft;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// The five authoring stages, in wizard order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthoringStage {
    /// Source file upload plus the workflow identity fields.
    #[default]
    Source,
    /// Operator review of the inferred column schema.
    SchemaReview,
    /// Parameter definition.
    Parameters,
    /// Processing step definition.
    Steps,
    /// Read-back of everything entered, ending in confirmation.
    Summary,
}

/// All stages in authoring order. Position in this slice is the stage index.
pub const STAGES: &[AuthoringStage] = &[
    AuthoringStage::Source,
    AuthoringStage::SchemaReview,
    AuthoringStage::Parameters,
    AuthoringStage::Steps,
    AuthoringStage::Summary,
];

/// Total number of authoring stages.
pub const STAGE_COUNT: usize = STAGES.len();

impl AuthoringStage {
    /// Resolve a zero-based stage index sent by the UI layer.
    pub fn from_index(index: usize) -> Result<Self, CoreError> {
        STAGES.get(index).copied().ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid stage index {index}. Must be between 0 and {}",
                STAGE_COUNT - 1
            ))
        })
    }

    /// Zero-based position of this stage in the wizard.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label for the wizard header.
    pub fn label(self) -> &'static str {
        match self {
            Self::Source => "Source & Identity",
            Self::SchemaReview => "Schema Review",
            Self::Parameters => "Parameters",
            Self::Steps => "Steps",
            Self::Summary => "Summary",
        }
    }

    /// The following stage, or `None` at the summary.
    pub fn next(self) -> Option<Self> {
        STAGES.get(self.index() + 1).copied()
    }

    /// The preceding stage, or `None` at the source stage.
    pub fn prev(self) -> Option<Self> {
        match self.index().checked_sub(1) {
            Some(i) => STAGES.get(i).copied(),
            None => None,
        }
    }

    /// Every reason the draft may not advance past this stage. Stages
    /// without a gating rule return an empty list.
    pub fn blocking_reasons(self, draft: &WorkflowDraft) -> Vec<String> {
        match self {
            Self::Source => source_reasons(draft),
            Self::SchemaReview => Vec::new(),
            Self::Parameters => parameter_reasons(draft),
            Self::Steps => step_reasons(draft),
            Self::Summary => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage predicates
// ---------------------------------------------------------------------------

fn source_reasons(draft: &WorkflowDraft) -> Vec<String> {
    let mut reasons = Vec::new();
    if !draft.is_file_uploaded {
        reasons.push("A source file must be uploaded".to_string());
    }
    if draft.workflow_name.trim().is_empty() {
        reasons.push("Workflow name is required".to_string());
    }
    if draft.workflow_description.trim().is_empty() {
        reasons.push("Workflow description is required".to_string());
    }
    if draft.user_id.trim().is_empty() {
        reasons.push("User ID is required".to_string());
    }
    reasons
}

/// A workflow with zero parameters is legal; only present-but-invalid
/// entries block.
fn parameter_reasons(draft: &WorkflowDraft) -> Vec<String> {
    draft
        .parameters
        .iter()
        .enumerate()
        .filter(|(_, param)| !param.is_valid())
        .map(|(i, _)| format!("Parameter {} is missing a name", i + 1))
        .collect()
}

/// A workflow with zero steps is legal; each present step needs both a
/// label and code.
fn step_reasons(draft: &WorkflowDraft) -> Vec<String> {
    let mut reasons = Vec::new();
    for (i, step) in draft.steps.iter().enumerate() {
        if step.label.is_empty() {
            reasons.push(format!("Step {} is missing a label", i + 1));
        }
        if step.code.is_empty() {
            reasons.push(format!("Step {} has no code", i + 1));
        }
    }
    reasons
}

// ---------------------------------------------------------------------------
// Gate decisions
// ---------------------------------------------------------------------------

/// Outcome of a gate evaluation. `allowed` is true exactly when `reasons`
/// is empty; the reasons list names every blocking field so the UI can show
/// all of them at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateDecision {
    pub allowed: bool,
    pub reasons: Vec<String>,
}

impl GateDecision {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            allowed: reasons.is_empty(),
            reasons,
        }
    }
}

/// Decide whether a draft may advance out of `stage` to the next one.
///
/// Pure and read-only. Results are not cacheable across edits; re-evaluate
/// after any field change.
pub fn can_advance(draft: &WorkflowDraft, stage: AuthoringStage) -> GateDecision {
    GateDecision::from_reasons(stage.blocking_reasons(draft))
}

/// Decide whether a draft may move from `from` to `to`.
///
/// Backward and in-place moves always pass. A forward move, including a
/// multi-stage jump, must pass the gate of every stage from `from` up to
/// but excluding `to`.
pub fn can_navigate(
    draft: &WorkflowDraft,
    from: AuthoringStage,
    to: AuthoringStage,
) -> GateDecision {
    if to.index() <= from.index() {
        return GateDecision::from_reasons(Vec::new());
    }
    let mut reasons = Vec::new();
    for stage in &STAGES[from.index()..to.index()] {
        reasons.extend(stage.blocking_reasons(draft));
    }
    GateDecision::from_reasons(reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{Parameter, Step};

    fn sourced_draft() -> WorkflowDraft {
        WorkflowDraft {
            workflow_name: "Noise Complaints".to_string(),
            workflow_description: "Rolls up complaints per borough".to_string(),
            user_id: "j.okafor".to_string(),
            is_file_uploaded: true,
            ..Default::default()
        }
    }

    // -- AuthoringStage --

    #[test]
    fn stage_indices_match_wizard_order() {
        for (i, stage) in STAGES.iter().enumerate() {
            assert_eq!(stage.index(), i);
            assert_eq!(AuthoringStage::from_index(i).unwrap(), *stage);
        }
        assert_eq!(STAGE_COUNT, 5);
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        let err = AuthoringStage::from_index(5).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn next_and_prev_walk_the_sequence() {
        assert_eq!(
            AuthoringStage::Source.next(),
            Some(AuthoringStage::SchemaReview)
        );
        assert_eq!(AuthoringStage::Summary.next(), None);
        assert_eq!(AuthoringStage::Source.prev(), None);
        assert_eq!(
            AuthoringStage::Summary.prev(),
            Some(AuthoringStage::Steps)
        );
    }

    #[test]
    fn labels_are_operator_facing() {
        assert_eq!(AuthoringStage::Source.label(), "Source & Identity");
        assert_eq!(AuthoringStage::SchemaReview.label(), "Schema Review");
        assert_eq!(AuthoringStage::Summary.label(), "Summary");
    }

    #[test]
    fn default_stage_is_source() {
        assert_eq!(AuthoringStage::default(), AuthoringStage::Source);
    }

    // -- source gate --

    #[test]
    fn complete_source_stage_advances() {
        let decision = can_advance(&sourced_draft(), AuthoringStage::Source);
        assert!(decision.allowed);
        assert!(decision.reasons.is_empty());
    }

    #[test]
    fn empty_draft_reports_every_source_reason() {
        let decision = can_advance(&WorkflowDraft::new(), AuthoringStage::Source);
        assert!(!decision.allowed);
        assert_eq!(decision.reasons.len(), 4);
        assert!(decision
            .reasons
            .iter()
            .any(|r| r.contains("source file")));
    }

    #[test]
    fn uploaded_file_without_description_still_blocks() {
        let mut draft = sourced_draft();
        draft.workflow_description = "  ".to_string();
        let decision = can_advance(&draft, AuthoringStage::Source);
        assert!(!decision.allowed);
        assert_eq!(
            decision.reasons,
            vec!["Workflow description is required".to_string()]
        );
    }

    // -- ungated stages --

    #[test]
    fn schema_review_and_summary_never_block() {
        let draft = WorkflowDraft::new();
        assert!(can_advance(&draft, AuthoringStage::SchemaReview).allowed);
        assert!(can_advance(&draft, AuthoringStage::Summary).allowed);
    }

    // -- parameter gate --

    #[test]
    fn zero_parameters_pass() {
        let decision = can_advance(&sourced_draft(), AuthoringStage::Parameters);
        assert!(decision.allowed);
    }

    #[test]
    fn unnamed_parameters_block_with_positions() {
        let mut draft = sourced_draft();
        draft.parameters = vec![
            Parameter {
                name: "district".to_string(),
                ..Default::default()
            },
            Parameter::default(),
            Parameter {
                name: " ".to_string(),
                ..Default::default()
            },
        ];
        let decision = can_advance(&draft, AuthoringStage::Parameters);
        assert!(!decision.allowed);
        assert_eq!(
            decision.reasons,
            vec![
                "Parameter 2 is missing a name".to_string(),
                "Parameter 3 is missing a name".to_string(),
            ]
        );
    }

    // -- step gate --

    #[test]
    fn zero_steps_pass() {
        assert!(can_advance(&sourced_draft(), AuthoringStage::Steps).allowed);
    }

    #[test]
    fn incomplete_steps_report_label_and_code_separately() {
        let mut draft = sourced_draft();
        draft.steps = vec![
            Step {
                label: "Clean".to_string(),
                code: "trim_whitespace()".to_string(),
            },
            Step::default(),
        ];
        let decision = can_advance(&draft, AuthoringStage::Steps);
        assert_eq!(
            decision.reasons,
            vec![
                "Step 2 is missing a label".to_string(),
                "Step 2 has no code".to_string(),
            ]
        );
    }

    #[test]
    fn allowed_tracks_reasons_exactly() {
        for stage in STAGES {
            let decision = can_advance(&WorkflowDraft::new(), *stage);
            assert_eq!(decision.allowed, decision.reasons.is_empty());
        }
    }

    // -- can_navigate --

    #[test]
    fn backward_movement_is_always_allowed() {
        let decision = can_navigate(
            &WorkflowDraft::new(),
            AuthoringStage::Steps,
            AuthoringStage::Source,
        );
        assert!(decision.allowed);
    }

    #[test]
    fn staying_in_place_is_allowed() {
        let decision = can_navigate(
            &WorkflowDraft::new(),
            AuthoringStage::Parameters,
            AuthoringStage::Parameters,
        );
        assert!(decision.allowed);
    }

    #[test]
    fn forward_jump_collects_every_intermediate_gate() {
        let mut draft = WorkflowDraft::new();
        draft.parameters = vec![Parameter::default()];
        let decision = can_navigate(&draft, AuthoringStage::Source, AuthoringStage::Steps);
        assert!(!decision.allowed);
        // Four identity reasons plus the unnamed parameter.
        assert_eq!(decision.reasons.len(), 5);
    }

    #[test]
    fn forward_jump_passes_when_all_gates_pass() {
        let decision = can_navigate(
            &sourced_draft(),
            AuthoringStage::Source,
            AuthoringStage::Summary,
        );
        assert!(decision.allowed);
    }

    #[test]
    fn target_stage_gate_is_not_evaluated() {
        let mut draft = sourced_draft();
        draft.steps = vec![Step::default()];
        // Moving INTO the steps stage is fine; its gate only applies on the
        // way out.
        let decision = can_navigate(&draft, AuthoringStage::Source, AuthoringStage::Steps);
        assert!(decision.allowed);
    }
}
