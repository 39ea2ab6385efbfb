//! Project kind, lifecycle status, and the status transition rules.
//!
//! A project is either a pre-thesis or a thesis; both move through the
//! same lifecycle, they differ only in which evaluator roles take part in
//! grading. Status values are stored as TEXT; the enums here are the only
//! place transitions are defined, so an undefined status string can never
//! be produced by the workflow layer.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Supervision and grading are under way; committee may be formed.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// A defense session exists with status `scheduled`.
pub const STATUS_DEFENSE_SCHEDULED: &str = "defense_scheduled";

/// The defense took place; waiting for the remaining evaluations.
pub const STATUS_DEFENSE_COMPLETED: &str = "defense_completed";

/// All required evaluations are in and the final score is recorded. Terminal.
pub const STATUS_COMPLETED: &str = "completed";

/// Abandoned before completion. Terminal.
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid project status strings.
pub const VALID_PROJECT_STATUSES: &[&str] = &[
    STATUS_IN_PROGRESS,
    STATUS_DEFENSE_SCHEDULED,
    STATUS_DEFENSE_COMPLETED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// A project graded before the main thesis stage. No committee.
pub const KIND_PRE_THESIS: &str = "pre_thesis";

/// A full thesis project with a defense committee.
pub const KIND_THESIS: &str = "thesis";

/// All valid project kind strings.
pub const VALID_PROJECT_KINDS: &[&str] = &[KIND_PRE_THESIS, KIND_THESIS];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The kind of supervised project. Determines the evaluator-role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    PreThesis,
    Thesis,
}

impl ProjectKind {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            KIND_PRE_THESIS => Ok(Self::PreThesis),
            KIND_THESIS => Ok(Self::Thesis),
            _ => Err(format!(
                "Invalid project kind '{s}'. Must be one of: {}",
                VALID_PROJECT_KINDS.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreThesis => KIND_PRE_THESIS,
            Self::Thesis => KIND_THESIS,
        }
    }

    /// Whether this kind of project convenes a defense committee.
    pub fn has_committee(&self) -> bool {
        matches!(self, Self::Thesis)
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    DefenseScheduled,
    DefenseCompleted,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_DEFENSE_SCHEDULED => Ok(Self::DefenseScheduled),
            STATUS_DEFENSE_COMPLETED => Ok(Self::DefenseCompleted),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            _ => Err(format!(
                "Invalid project status '{s}'. Must be one of: {}",
                VALID_PROJECT_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::DefenseScheduled => STATUS_DEFENSE_SCHEDULED,
            Self::DefenseCompleted => STATUS_DEFENSE_COMPLETED,
            Self::Completed => STATUS_COMPLETED,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }

    /// Returns the set of statuses reachable from `self`.
    ///
    /// Terminal statuses (`Completed`, `Cancelled`) return an empty slice.
    pub fn valid_transitions(&self) -> &'static [ProjectStatus] {
        match self {
            Self::InProgress => &[Self::DefenseScheduled, Self::Cancelled],
            Self::DefenseScheduled => &[Self::DefenseCompleted, Self::Cancelled],
            Self::DefenseCompleted => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is allowed.
    pub fn can_transition(&self, to: ProjectStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a transition, returning a descriptive error for illegal ones.
    pub fn validate_transition(&self, to: ProjectStatus) -> Result<(), String> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(format!(
                "Invalid transition: {} -> {}",
                self.as_str(),
                to.as_str()
            ))
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- string round trips ---------------------------------------------------

    #[test]
    fn status_from_str_round_trip() {
        for status in &[
            ProjectStatus::InProgress,
            ProjectStatus::DefenseScheduled,
            ProjectStatus::DefenseCompleted,
            ProjectStatus::Completed,
            ProjectStatus::Cancelled,
        ] {
            assert_eq!(
                ProjectStatus::from_str_value(status.as_str()).unwrap(),
                *status
            );
        }
    }

    #[test]
    fn invalid_status_rejected() {
        let result = ProjectStatus::from_str_value("archived");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid project status"));
    }

    #[test]
    fn kind_from_str_round_trip() {
        for kind in &[ProjectKind::PreThesis, ProjectKind::Thesis] {
            assert_eq!(ProjectKind::from_str_value(kind.as_str()).unwrap(), *kind);
        }
    }

    #[test]
    fn invalid_kind_rejected() {
        assert!(ProjectKind::from_str_value("dissertation").is_err());
    }

    #[test]
    fn only_thesis_has_committee() {
        assert!(ProjectKind::Thesis.has_committee());
        assert!(!ProjectKind::PreThesis.has_committee());
    }

    // -- forward transitions --------------------------------------------------

    #[test]
    fn in_progress_to_defense_scheduled() {
        assert!(ProjectStatus::InProgress.can_transition(ProjectStatus::DefenseScheduled));
    }

    #[test]
    fn defense_scheduled_to_defense_completed() {
        assert!(ProjectStatus::DefenseScheduled.can_transition(ProjectStatus::DefenseCompleted));
    }

    #[test]
    fn defense_completed_to_completed() {
        assert!(ProjectStatus::DefenseCompleted.can_transition(ProjectStatus::Completed));
    }

    // -- cancellation reachable from every pre-completion state ---------------

    #[test]
    fn cancel_from_in_progress() {
        assert!(ProjectStatus::InProgress.can_transition(ProjectStatus::Cancelled));
    }

    #[test]
    fn cancel_from_defense_scheduled() {
        assert!(ProjectStatus::DefenseScheduled.can_transition(ProjectStatus::Cancelled));
    }

    #[test]
    fn cancel_from_defense_completed() {
        assert!(ProjectStatus::DefenseCompleted.can_transition(ProjectStatus::Cancelled));
    }

    // -- terminal states have no outgoing transitions -------------------------

    #[test]
    fn completed_is_terminal() {
        assert!(ProjectStatus::Completed.is_terminal());
        assert!(ProjectStatus::Completed.valid_transitions().is_empty());
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(ProjectStatus::Cancelled.is_terminal());
        assert!(!ProjectStatus::Cancelled.can_transition(ProjectStatus::InProgress));
    }

    // -- invalid transitions --------------------------------------------------

    #[test]
    fn no_skipping_defense() {
        assert!(!ProjectStatus::InProgress.can_transition(ProjectStatus::DefenseCompleted));
        assert!(!ProjectStatus::InProgress.can_transition(ProjectStatus::Completed));
    }

    #[test]
    fn no_going_backwards() {
        assert!(!ProjectStatus::DefenseScheduled.can_transition(ProjectStatus::InProgress));
        assert!(!ProjectStatus::DefenseCompleted.can_transition(ProjectStatus::DefenseScheduled));
    }

    #[test]
    fn validate_transition_err_is_descriptive() {
        let err = ProjectStatus::Completed
            .validate_transition(ProjectStatus::Cancelled)
            .unwrap_err();
        assert!(err.contains("completed"));
        assert!(err.contains("cancelled"));
    }
}
