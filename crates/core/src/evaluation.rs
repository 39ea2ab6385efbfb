//! Evaluation ledger arithmetic.
//!
//! One evaluation per (project, role, teacher); supervisor and reviewer
//! are singleton roles, committee members contribute one each. The ledger
//! yields two derived figures:
//!
//! - **pre-defense score** — mean of the supervisor and reviewer scores,
//!   defined once both exist; gates committee assignment and defense
//!   scheduling.
//! - **final score** — mean over every required evaluator for the
//!   project's kind, defined once all of them have submitted; gates
//!   completion.
//!
//! Equal weighting throughout (see DESIGN.md for the open question on
//! role-weighted formulas).

use crate::assignment::RoleBinding;
use crate::error::CoreError;
use crate::roles::EvaluatorRole;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score.
pub const MAX_SCORE: f64 = 100.0;

/// Maximum length for evaluation comments.
pub const MAX_COMMENTS_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One recorded score, the latest value for its (role, teacher) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEntry {
    pub role: EvaluatorRole,
    pub teacher_id: DbId,
    pub score: f64,
}

/// An evaluator whose submission is required for the current stage.
///
/// `teacher_id` is `None` when the role is required but nobody holds it
/// yet (no reviewer assigned); such a requirement can never be satisfied
/// until the assignment exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredEvaluator {
    pub role: EvaluatorRole,
    pub teacher_id: Option<DbId>,
}

/// Result of checking the ledger against the required evaluator set.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerAggregate {
    /// True iff every required evaluator has a recorded score.
    pub complete: bool,
    /// Scores of required evaluators that have submitted.
    pub scores: Vec<ScoreEntry>,
    /// Human-readable labels of evaluators still missing.
    pub missing: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that a score is within the accepted grading range.
pub fn validate_score(score: f64) -> Result<(), CoreError> {
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(CoreError::Validation(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
        )));
    }
    Ok(())
}

/// Validate evaluation comments length.
pub fn validate_comments(comments: Option<&str>) -> Result<(), CoreError> {
    if let Some(c) = comments {
        if c.len() > MAX_COMMENTS_LENGTH {
            return Err(CoreError::Validation(format!(
                "Comments exceed maximum length of {MAX_COMMENTS_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validate that the submitting teacher actually holds the claimed role.
///
/// The supervisor role is checked against the project record; reviewer and
/// committee roles against the assignment registry.
pub fn validate_submitter(
    role: EvaluatorRole,
    teacher_id: DbId,
    supervisor_id: DbId,
    bindings: &[RoleBinding],
) -> Result<(), CoreError> {
    let holds_role = match role {
        EvaluatorRole::Supervisor => teacher_id == supervisor_id,
        EvaluatorRole::Reviewer | EvaluatorRole::CommitteeMember => bindings
            .iter()
            .any(|b| b.teacher_id == teacher_id && b.role == role),
    };

    if holds_role {
        Ok(())
    } else {
        Err(CoreError::UnauthorizedRole(format!(
            "Teacher {teacher_id} does not hold the {} role on this project",
            role.as_str()
        )))
    }
}

// ---------------------------------------------------------------------------
// Required evaluator set
// ---------------------------------------------------------------------------

/// The evaluators whose scores make up the final grade.
///
/// Supervisor and reviewer always; every assigned committee member when
/// the project kind convenes a committee.
pub fn required_evaluators(
    has_committee: bool,
    supervisor_id: DbId,
    reviewer_id: Option<DbId>,
    committee: &[DbId],
) -> Vec<RequiredEvaluator> {
    let mut required = vec![
        RequiredEvaluator {
            role: EvaluatorRole::Supervisor,
            teacher_id: Some(supervisor_id),
        },
        RequiredEvaluator {
            role: EvaluatorRole::Reviewer,
            teacher_id: reviewer_id,
        },
    ];
    if has_committee {
        required.extend(committee.iter().map(|&id| RequiredEvaluator {
            role: EvaluatorRole::CommitteeMember,
            teacher_id: Some(id),
        }));
    }
    required
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Label used in `missing` lists, e.g. `"reviewer"` or `"committee_member 7"`.
fn evaluator_label(req: &RequiredEvaluator) -> String {
    match req.teacher_id {
        Some(id) if req.role == EvaluatorRole::CommitteeMember => {
            format!("{} {id}", req.role.as_str())
        }
        _ => req.role.as_str().to_string(),
    }
}

/// Check the ledger against the required evaluator set.
pub fn aggregate(entries: &[ScoreEntry], required: &[RequiredEvaluator]) -> LedgerAggregate {
    let mut scores = Vec::with_capacity(required.len());
    let mut missing = Vec::new();

    for req in required {
        let found = req.teacher_id.and_then(|id| {
            entries
                .iter()
                .find(|e| e.role == req.role && e.teacher_id == id)
        });
        match found {
            Some(entry) => scores.push(*entry),
            None => missing.push(evaluator_label(req)),
        }
    }

    LedgerAggregate {
        complete: missing.is_empty(),
        scores,
        missing,
    }
}

/// Latest score recorded for a singleton role, if any.
pub fn score_of(entries: &[ScoreEntry], role: EvaluatorRole) -> Option<f64> {
    entries.iter().find(|e| e.role == role).map(|e| e.score)
}

/// Mean of the supervisor and reviewer scores; `None` until both exist.
pub fn pre_defense_score(entries: &[ScoreEntry]) -> Option<f64> {
    let supervisor = score_of(entries, EvaluatorRole::Supervisor)?;
    let reviewer = score_of(entries, EvaluatorRole::Reviewer)?;
    Some((supervisor + reviewer) / 2.0)
}

/// Mean over all required evaluators; `None` until every one has submitted.
pub fn final_score(entries: &[ScoreEntry], required: &[RequiredEvaluator]) -> Option<f64> {
    let agg = aggregate(entries, required);
    if !agg.complete || agg.scores.is_empty() {
        return None;
    }
    let sum: f64 = agg.scores.iter().map(|e| e.score).sum();
    Some(sum / agg.scores.len() as f64)
}
