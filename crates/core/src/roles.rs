//! Evaluator role definitions.
//!
//! Three roles grade a project: the supervisor (implicit from
//! `Project.supervisor_id`, never stored as an assignment), at most one
//! reviewer, and zero or more committee members. Role strings must match
//! the values accepted by the `assignments.role` and `evaluations.role`
//! columns.

use serde::{Deserialize, Serialize};

/// The student's supervisor. Implicit from the project record.
pub const ROLE_SUPERVISOR: &str = "supervisor";

/// The opposing reviewer. At most one per project.
pub const ROLE_REVIEWER: &str = "reviewer";

/// A defense committee member. A set per project, thesis only.
pub const ROLE_COMMITTEE_MEMBER: &str = "committee_member";

/// All valid evaluator role strings.
pub const VALID_EVALUATOR_ROLES: &[&str] =
    &[ROLE_SUPERVISOR, ROLE_REVIEWER, ROLE_COMMITTEE_MEMBER];

/// A teacher's grading role on a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorRole {
    Supervisor,
    Reviewer,
    CommitteeMember,
}

impl EvaluatorRole {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_SUPERVISOR => Ok(Self::Supervisor),
            ROLE_REVIEWER => Ok(Self::Reviewer),
            ROLE_COMMITTEE_MEMBER => Ok(Self::CommitteeMember),
            _ => Err(format!(
                "Invalid evaluator role '{s}'. Must be one of: {}",
                VALID_EVALUATOR_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supervisor => ROLE_SUPERVISOR,
            Self::Reviewer => ROLE_REVIEWER,
            Self::CommitteeMember => ROLE_COMMITTEE_MEMBER,
        }
    }

    /// Roles that are stored in the assignment registry.
    ///
    /// The supervisor is bound at project creation and never appears as an
    /// assignment row.
    pub fn is_assignable(&self) -> bool {
        !matches!(self, Self::Supervisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_str_round_trip() {
        for role in &[
            EvaluatorRole::Supervisor,
            EvaluatorRole::Reviewer,
            EvaluatorRole::CommitteeMember,
        ] {
            assert_eq!(EvaluatorRole::from_str_value(role.as_str()).unwrap(), *role);
        }
    }

    #[test]
    fn invalid_role_rejected() {
        let result = EvaluatorRole::from_str_value("opponent");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid evaluator role"));
    }

    #[test]
    fn supervisor_is_not_assignable() {
        assert!(!EvaluatorRole::Supervisor.is_assignable());
        assert!(EvaluatorRole::Reviewer.is_assignable());
        assert!(EvaluatorRole::CommitteeMember.is_assignable());
    }

    #[test]
    fn valid_roles_complete() {
        assert_eq!(VALID_EVALUATOR_ROLES.len(), 3);
    }
}
