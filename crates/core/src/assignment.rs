//! Committee role assignment invariants.
//!
//! Pure validation over the project's current role bindings, pre-loaded by
//! the caller. Invariants enforced here:
//!
//! - at most one reviewer per project
//! - committee members form a set (no duplicate teacher)
//! - a teacher holds at most one role on a project, supervisor included
//! - the evaluator set is frozen once the defense has been completed

use crate::error::CoreError;
use crate::roles::EvaluatorRole;
use crate::types::DbId;

/// A teacher's stored role binding on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleBinding {
    pub teacher_id: DbId,
    pub role: EvaluatorRole,
}

/// The reviewer bound to the project, if one is assigned.
pub fn reviewer_of(bindings: &[RoleBinding]) -> Option<DbId> {
    bindings
        .iter()
        .find(|b| b.role == EvaluatorRole::Reviewer)
        .map(|b| b.teacher_id)
}

/// Teacher ids of all assigned committee members.
pub fn committee_of(bindings: &[RoleBinding]) -> Vec<DbId> {
    bindings
        .iter()
        .filter(|b| b.role == EvaluatorRole::CommitteeMember)
        .map(|b| b.teacher_id)
        .collect()
}

/// Validate an assignment request against the current bindings.
///
/// The committee eligibility gate (pre-defense score) is a separate check
/// owned by [`crate::eligibility`]; this function covers cardinality and
/// role-exclusivity only.
pub fn validate_assign(
    role: EvaluatorRole,
    teacher_id: DbId,
    supervisor_id: DbId,
    bindings: &[RoleBinding],
) -> Result<(), CoreError> {
    if role == EvaluatorRole::Supervisor {
        return Err(CoreError::Validation(
            "The supervisor is bound at project creation and cannot be assigned".to_string(),
        ));
    }

    if teacher_id == supervisor_id {
        return Err(CoreError::Conflict(format!(
            "Teacher {teacher_id} already supervises this project and cannot also act as {}",
            role.as_str()
        )));
    }

    if bindings.iter().any(|b| b.teacher_id == teacher_id) {
        return Err(CoreError::Conflict(format!(
            "Teacher {teacher_id} is already assigned to this project"
        )));
    }

    if role == EvaluatorRole::Reviewer {
        if let Some(existing) = reviewer_of(bindings) {
            return Err(CoreError::Conflict(format!(
                "Project already has a reviewer (teacher {existing})"
            )));
        }
    }

    Ok(())
}

/// Validate a removal request.
///
/// Grading evaluators must remain stable once the defense has been
/// completed, so any removal after that point fails with `Locked`.
pub fn validate_remove(
    role: EvaluatorRole,
    has_completed_defense: bool,
) -> Result<(), CoreError> {
    if role == EvaluatorRole::Supervisor {
        return Err(CoreError::Validation(
            "The supervisor cannot be removed from a project".to_string(),
        ));
    }
    if has_completed_defense {
        return Err(CoreError::Locked(
            "Evaluator assignments are frozen after defense completion".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPERVISOR: DbId = 1;
    const REVIEWER: DbId = 2;
    const MEMBER: DbId = 3;

    fn bindings() -> Vec<RoleBinding> {
        vec![
            RoleBinding {
                teacher_id: REVIEWER,
                role: EvaluatorRole::Reviewer,
            },
            RoleBinding {
                teacher_id: MEMBER,
                role: EvaluatorRole::CommitteeMember,
            },
        ]
    }

    // -- lookup helpers -------------------------------------------------------

    #[test]
    fn reviewer_lookup() {
        assert_eq!(reviewer_of(&bindings()), Some(REVIEWER));
        assert_eq!(reviewer_of(&[]), None);
    }

    #[test]
    fn committee_lookup() {
        assert_eq!(committee_of(&bindings()), vec![MEMBER]);
        assert!(committee_of(&[]).is_empty());
    }

    // -- validate_assign ------------------------------------------------------

    #[test]
    fn first_reviewer_accepted() {
        assert!(validate_assign(EvaluatorRole::Reviewer, REVIEWER, SUPERVISOR, &[]).is_ok());
    }

    #[test]
    fn second_reviewer_conflicts() {
        let result = validate_assign(EvaluatorRole::Reviewer, 9, SUPERVISOR, &bindings());
        assert!(matches!(result, Err(CoreError::Conflict(_))));
    }

    #[test]
    fn supervisor_cannot_review_own_supervisee() {
        let result = validate_assign(EvaluatorRole::Reviewer, SUPERVISOR, SUPERVISOR, &[]);
        assert!(matches!(result, Err(CoreError::Conflict(_))));
    }

    #[test]
    fn supervisor_cannot_join_committee() {
        let result =
            validate_assign(EvaluatorRole::CommitteeMember, SUPERVISOR, SUPERVISOR, &[]);
        assert!(matches!(result, Err(CoreError::Conflict(_))));
    }

    #[test]
    fn teacher_cannot_hold_two_roles() {
        let result =
            validate_assign(EvaluatorRole::CommitteeMember, REVIEWER, SUPERVISOR, &bindings());
        assert!(matches!(result, Err(CoreError::Conflict(_))));
    }

    #[test]
    fn duplicate_committee_member_conflicts() {
        let result =
            validate_assign(EvaluatorRole::CommitteeMember, MEMBER, SUPERVISOR, &bindings());
        assert!(matches!(result, Err(CoreError::Conflict(_))));
    }

    #[test]
    fn new_committee_member_accepted() {
        assert!(
            validate_assign(EvaluatorRole::CommitteeMember, 9, SUPERVISOR, &bindings()).is_ok()
        );
    }

    #[test]
    fn explicit_supervisor_assignment_rejected() {
        let result = validate_assign(EvaluatorRole::Supervisor, 9, SUPERVISOR, &[]);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    // -- validate_remove ------------------------------------------------------

    #[test]
    fn removal_allowed_before_defense() {
        assert!(validate_remove(EvaluatorRole::Reviewer, false).is_ok());
        assert!(validate_remove(EvaluatorRole::CommitteeMember, false).is_ok());
    }

    #[test]
    fn removal_locked_after_defense_completion() {
        let result = validate_remove(EvaluatorRole::CommitteeMember, true);
        assert!(matches!(result, Err(CoreError::Locked(_))));
    }

    #[test]
    fn supervisor_removal_rejected() {
        let result = validate_remove(EvaluatorRole::Supervisor, false);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
