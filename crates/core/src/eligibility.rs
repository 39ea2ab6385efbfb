//! Eligibility gates for committee assignment and defense scheduling.
//!
//! Pure, side-effect-free predicates recomputed on demand from state the
//! caller pre-loads. "Not yet eligible" is a normal value, never an error:
//! each gate returns a [`GateDecision`] carrying the pre-defense score (if
//! defined) and a human-readable reason when blocked, so any caller can
//! render a specific message.

use serde::Serialize;

use crate::evaluation::{pre_defense_score, score_of, ScoreEntry};
use crate::project::{ProjectKind, ProjectStatus};
use crate::roles::EvaluatorRole;

/// Default minimum pre-defense score required to advance.
pub const DEFAULT_PASS_THRESHOLD: f64 = 50.0;

/// Outcome of an eligibility gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateDecision {
    pub eligible: bool,
    pub pre_defense_score: Option<f64>,
    pub reason: Option<String>,
}

impl GateDecision {
    fn open(score: f64) -> Self {
        Self {
            eligible: true,
            pre_defense_score: Some(score),
            reason: None,
        }
    }

    fn blocked(score: Option<f64>, reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            pre_defense_score: score,
            reason: Some(reason.into()),
        }
    }
}

/// Shared precondition of both gates: supervisor and reviewer evaluations
/// exist and their mean clears the pass threshold.
fn check_pre_defense(entries: &[ScoreEntry], pass_threshold: f64) -> Result<f64, GateDecision> {
    let Some(supervisor) = score_of(entries, EvaluatorRole::Supervisor) else {
        return Err(GateDecision::blocked(
            None,
            "Awaiting supervisor evaluation",
        ));
    };
    let Some(reviewer) = score_of(entries, EvaluatorRole::Reviewer) else {
        return Err(GateDecision::blocked(None, "Awaiting reviewer evaluation"));
    };

    let score = (supervisor + reviewer) / 2.0;
    if score < pass_threshold {
        return Err(GateDecision::blocked(
            Some(score),
            format!("Pre-defense score {score} is below the pass threshold {pass_threshold}"),
        ));
    }
    Ok(score)
}

/// Whether committee members may currently be assigned.
///
/// Requires a committee-bearing project kind, `in_progress` status, and a
/// passing pre-defense score.
pub fn can_assign_committee(
    kind: ProjectKind,
    status: ProjectStatus,
    entries: &[ScoreEntry],
    pass_threshold: f64,
) -> GateDecision {
    if !kind.has_committee() {
        return GateDecision::blocked(
            pre_defense_score(entries),
            "Pre-thesis projects have no defense committee",
        );
    }
    if status != ProjectStatus::InProgress {
        return GateDecision::blocked(
            pre_defense_score(entries),
            format!(
                "Committee can only be changed while the project is in progress (status: {})",
                status.as_str()
            ),
        );
    }
    match check_pre_defense(entries, pass_threshold) {
        Ok(score) => GateDecision::open(score),
        Err(decision) => decision,
    }
}

/// Whether a defense session may currently be scheduled.
///
/// Same pre-defense precondition as committee assignment; committee
/// presence is NOT required here — it is enforced by the evaluation ledger
/// before the final grade is awarded.
pub fn can_schedule_defense(
    status: ProjectStatus,
    entries: &[ScoreEntry],
    pass_threshold: f64,
) -> GateDecision {
    if status != ProjectStatus::InProgress {
        return GateDecision::blocked(
            pre_defense_score(entries),
            format!(
                "A defense can only be scheduled while the project is in progress (status: {})",
                status.as_str()
            ),
        );
    }
    match check_pre_defense(entries, pass_threshold) {
        Ok(score) => GateDecision::open(score),
        Err(decision) => decision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DbId;

    const SUPERVISOR: DbId = 1;
    const REVIEWER: DbId = 2;

    fn entries(supervisor: Option<f64>, reviewer: Option<f64>) -> Vec<ScoreEntry> {
        let mut v = Vec::new();
        if let Some(score) = supervisor {
            v.push(ScoreEntry {
                role: EvaluatorRole::Supervisor,
                teacher_id: SUPERVISOR,
                score,
            });
        }
        if let Some(score) = reviewer {
            v.push(ScoreEntry {
                role: EvaluatorRole::Reviewer,
                teacher_id: REVIEWER,
                score,
            });
        }
        v
    }

    // -- can_assign_committee -------------------------------------------------

    #[test]
    fn committee_gate_opens_on_passing_scores() {
        // Supervisor 70, reviewer 80 -> pre-defense 75, eligible.
        let decision = can_assign_committee(
            ProjectKind::Thesis,
            ProjectStatus::InProgress,
            &entries(Some(70.0), Some(80.0)),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(decision.eligible);
        assert_eq!(decision.pre_defense_score, Some(75.0));
        assert!(decision.reason.is_none());
    }

    #[test]
    fn committee_gate_blocked_without_any_evaluation() {
        let decision = can_assign_committee(
            ProjectKind::Thesis,
            ProjectStatus::InProgress,
            &[],
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(!decision.eligible);
        assert_eq!(decision.pre_defense_score, None);
        assert!(decision.reason.unwrap().contains("supervisor"));
    }

    #[test]
    fn committee_gate_blocked_awaiting_reviewer() {
        let decision = can_assign_committee(
            ProjectKind::Thesis,
            ProjectStatus::InProgress,
            &entries(Some(70.0), None),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(!decision.eligible);
        assert!(decision.reason.unwrap().contains("reviewer"));
    }

    #[test]
    fn committee_gate_threshold_boundary() {
        // Mean 49 -> ineligible; mean 50 -> eligible.
        let below = can_assign_committee(
            ProjectKind::Thesis,
            ProjectStatus::InProgress,
            &entries(Some(49.0), Some(49.0)),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(!below.eligible);
        assert!(below.reason.unwrap().contains("below the pass threshold"));

        let at = can_assign_committee(
            ProjectKind::Thesis,
            ProjectStatus::InProgress,
            &entries(Some(50.0), Some(50.0)),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(at.eligible);
    }

    #[test]
    fn committee_gate_respects_custom_threshold() {
        let decision = can_assign_committee(
            ProjectKind::Thesis,
            ProjectStatus::InProgress,
            &entries(Some(70.0), Some(80.0)),
            80.0,
        );
        assert!(!decision.eligible);
        assert_eq!(decision.pre_defense_score, Some(75.0));
    }

    #[test]
    fn pre_thesis_never_assigns_committee() {
        let decision = can_assign_committee(
            ProjectKind::PreThesis,
            ProjectStatus::InProgress,
            &entries(Some(90.0), Some(90.0)),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(!decision.eligible);
        assert!(decision.reason.unwrap().contains("Pre-thesis"));
    }

    #[test]
    fn committee_gate_closed_after_scheduling() {
        let decision = can_assign_committee(
            ProjectKind::Thesis,
            ProjectStatus::DefenseScheduled,
            &entries(Some(70.0), Some(80.0)),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(!decision.eligible);
        assert!(decision.reason.unwrap().contains("in progress"));
    }

    // -- can_schedule_defense -------------------------------------------------

    #[test]
    fn schedule_gate_opens_without_committee() {
        // Committee presence is not required to schedule.
        let decision = can_schedule_defense(
            ProjectStatus::InProgress,
            &entries(Some(70.0), Some(80.0)),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(decision.eligible);
        assert_eq!(decision.pre_defense_score, Some(75.0));
    }

    #[test]
    fn schedule_gate_blocked_with_only_supervisor_score() {
        // Supervisor 70, reviewer missing -> score undefined, reason names
        // the missing reviewer evaluation.
        let decision = can_schedule_defense(
            ProjectStatus::InProgress,
            &entries(Some(70.0), None),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(!decision.eligible);
        assert_eq!(decision.pre_defense_score, None);
        assert!(decision.reason.unwrap().contains("reviewer evaluation"));
    }

    #[test]
    fn schedule_gate_blocked_below_threshold() {
        let decision = can_schedule_defense(
            ProjectStatus::InProgress,
            &entries(Some(30.0), Some(40.0)),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(!decision.eligible);
        assert_eq!(decision.pre_defense_score, Some(35.0));
    }

    #[test]
    fn schedule_gate_closed_once_scheduled() {
        let decision = can_schedule_defense(
            ProjectStatus::DefenseScheduled,
            &entries(Some(70.0), Some(80.0)),
            DEFAULT_PASS_THRESHOLD,
        );
        assert!(!decision.eligible);
        assert!(decision.reason.unwrap().contains("status: defense_scheduled"));
    }
}
