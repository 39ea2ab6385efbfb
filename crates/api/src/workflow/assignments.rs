//! Committee role assignment operations.

use serde_json::json;

use gradus_core::assignment::{validate_assign, validate_remove};
use gradus_core::defense::SessionStatus;
use gradus_core::eligibility::can_assign_committee;
use gradus_core::error::CoreError;
use gradus_core::project::ProjectStatus;
use gradus_core::roles::EvaluatorRole;
use gradus_core::types::DbId;
use gradus_db::models::assignment::{Assignment, AssignRequest};
use gradus_db::repositories::{AssignmentRepo, DefenseSessionRepo};
use gradus_events::bus::{
    DomainEvent, EVENT_ASSIGNMENT_REMOVED, EVENT_COMMITTEE_ASSIGNED, EVENT_REVIEWER_ASSIGNED,
};

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::workflow::lock_context;

/// Assign a teacher to a project role (reviewer or committee member).
///
/// Reviewer assignment requires an in-progress project with no existing
/// reviewer; committee assignment additionally requires the committee
/// eligibility gate to be open (passing pre-defense score).
pub async fn assign(
    state: &AppState,
    project_id: DbId,
    input: &AssignRequest,
    actor: &Actor,
) -> AppResult<Assignment> {
    let role = EvaluatorRole::from_str_value(&input.role)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let mut tx = state.pool.begin().await?;
    let ctx = lock_context(&mut tx, project_id).await?;

    match role {
        EvaluatorRole::CommitteeMember => {
            let gate =
                can_assign_committee(ctx.kind, ctx.status, &ctx.entries, state.config.pass_threshold);
            if !gate.eligible {
                return Err(AppError::Core(CoreError::Ineligible(
                    gate.reason
                        .unwrap_or_else(|| "Committee assignment gate is closed".to_string()),
                )));
            }
        }
        _ => {
            // Reviewer changes are part of setting up the grading stage and
            // only make sense while the project is in progress.
            if ctx.status != ProjectStatus::InProgress {
                return Err(AppError::Core(CoreError::InvalidState(format!(
                    "Assignments can only be changed while the project is in progress (status: {})",
                    ctx.status.as_str()
                ))));
            }
        }
    }

    validate_assign(
        role,
        input.teacher_id,
        ctx.project.supervisor_id,
        &ctx.bindings,
    )?;

    let assignment =
        AssignmentRepo::insert(&mut *tx, project_id, input.teacher_id, role.as_str()).await?;
    tx.commit().await?;

    let event_type = match role {
        EvaluatorRole::Reviewer => EVENT_REVIEWER_ASSIGNED,
        _ => EVENT_COMMITTEE_ASSIGNED,
    };
    state.event_bus.publish(
        DomainEvent::new(event_type)
            .with_source("project", project_id)
            .with_actor(actor.teacher_id)
            .with_payload(json!({
                "teacher_id": input.teacher_id,
                "role": role.as_str(),
            })),
    );

    Ok(assignment)
}

/// Remove a teacher's role assignment.
///
/// Fails with `Locked` once the defense has been completed: the evaluator
/// set must remain stable for grade auditability.
pub async fn remove(
    state: &AppState,
    project_id: DbId,
    teacher_id: DbId,
    actor: &Actor,
) -> AppResult<()> {
    let mut tx = state.pool.begin().await?;
    // Take the project lock first so the removal serializes with any
    // concurrent defense completion.
    let _ctx = lock_context(&mut tx, project_id).await?;

    let assignment = AssignmentRepo::find(&mut *tx, project_id, teacher_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Assignment",
            id: teacher_id,
        }))?;

    let role = EvaluatorRole::from_str_value(&assignment.role)
        .map_err(|e| AppError::Core(CoreError::Internal(e)))?;

    let session = DefenseSessionRepo::find_active_for_project(&mut *tx, project_id).await?;
    let has_completed_defense = session
        .as_ref()
        .map(|s| s.status == SessionStatus::Completed.as_str())
        .unwrap_or(false);

    validate_remove(role, has_completed_defense)?;

    AssignmentRepo::delete(&mut *tx, project_id, teacher_id).await?;
    tx.commit().await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_ASSIGNMENT_REMOVED)
            .with_source("project", project_id)
            .with_actor(actor.teacher_id)
            .with_payload(json!({
                "teacher_id": teacher_id,
                "role": role.as_str(),
            })),
    );

    Ok(())
}
