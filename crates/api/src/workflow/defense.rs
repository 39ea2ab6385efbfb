//! Defense session scheduling, rescheduling, and completion.

use chrono::Utc;
use serde_json::json;

use gradus_core::defense::{
    validate_booking, validate_completable, validate_reschedulable, SessionStatus,
};
use gradus_core::eligibility::can_schedule_defense;
use gradus_core::error::CoreError;
use gradus_core::project::ProjectStatus;
use gradus_core::types::DbId;
use gradus_db::models::defense_session::{
    CompleteDefenseRequest, DefenseSession, RescheduleDefenseRequest, ScheduleDefenseRequest,
};
use gradus_db::models::project::Project;
use gradus_db::repositories::{DefenseSessionRepo, ProjectRepo};
use gradus_events::bus::{
    DomainEvent, EVENT_DEFENSE_COMPLETED, EVENT_DEFENSE_RESCHEDULED, EVENT_DEFENSE_SCHEDULED,
    EVENT_PROJECT_COMPLETED,
};

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::workflow::{lock_context, try_finalize};

/// Parse a stored session status string; corruption, not caller input.
fn parse_session_status(session: &DefenseSession) -> AppResult<SessionStatus> {
    SessionStatus::from_str_value(&session.status)
        .map_err(|e| AppError::Core(CoreError::Internal(e)))
}

/// Schedule the defense session for a project.
///
/// Requires the scheduling gate to be open (passing pre-defense score)
/// and no existing non-cancelled session. Moves the project to
/// `defense_scheduled`.
pub async fn schedule(
    state: &AppState,
    project_id: DbId,
    input: &ScheduleDefenseRequest,
    actor: &Actor,
) -> AppResult<(DefenseSession, Project)> {
    validate_booking(
        Utc::now(),
        input.scheduled_at,
        &input.room,
        input.notes.as_deref(),
    )?;

    let mut tx = state.pool.begin().await?;
    let ctx = lock_context(&mut tx, project_id).await?;

    let gate = can_schedule_defense(ctx.status, &ctx.entries, state.config.pass_threshold);
    if !gate.eligible {
        return Err(AppError::Core(CoreError::Ineligible(
            gate.reason
                .unwrap_or_else(|| "Defense scheduling gate is closed".to_string()),
        )));
    }

    if let Some(existing) = DefenseSessionRepo::find_active_for_project(&mut *tx, project_id).await?
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Project already has an active defense session (id {})",
            existing.id
        ))));
    }

    ctx.status
        .validate_transition(ProjectStatus::DefenseScheduled)
        .map_err(|e| AppError::Core(CoreError::InvalidState(e)))?;

    let session = DefenseSessionRepo::insert(
        &mut *tx,
        project_id,
        input.scheduled_at,
        &input.room,
        input.notes.as_deref(),
        SessionStatus::Scheduled.as_str(),
    )
    .await?;
    let project = ProjectRepo::set_status(
        &mut *tx,
        project_id,
        ProjectStatus::DefenseScheduled.as_str(),
    )
    .await?;

    tx.commit().await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_DEFENSE_SCHEDULED)
            .with_source("defense_session", session.id)
            .with_actor(actor.teacher_id)
            .with_payload(json!({
                "project_id": project_id,
                "scheduled_at": session.scheduled_at,
                "room": session.room,
            })),
    );

    Ok((session, project))
}

/// Rebook a session's time, room, or notes while it is still `scheduled`.
///
/// Does not change the project status.
pub async fn reschedule(
    state: &AppState,
    session_id: DbId,
    input: &RescheduleDefenseRequest,
    actor: &Actor,
) -> AppResult<DefenseSession> {
    validate_booking(
        Utc::now(),
        input.scheduled_at,
        &input.room,
        input.notes.as_deref(),
    )?;

    let mut tx = state.pool.begin().await?;
    let session = DefenseSessionRepo::find_by_id(&mut *tx, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DefenseSession",
            id: session_id,
        }))?;

    // Serialize with other workflow mutations on the owning project, then
    // re-read the session now that the lock is held.
    let _ctx = lock_context(&mut tx, session.project_id).await?;
    let session = DefenseSessionRepo::find_by_id(&mut *tx, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DefenseSession",
            id: session_id,
        }))?;

    validate_reschedulable(parse_session_status(&session)?)?;

    let session = DefenseSessionRepo::update_booking(
        &mut *tx,
        session_id,
        input.scheduled_at,
        &input.room,
        input.notes.as_deref(),
    )
    .await?;

    tx.commit().await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_DEFENSE_RESCHEDULED)
            .with_source("defense_session", session.id)
            .with_actor(actor.teacher_id)
            .with_payload(json!({
                "project_id": session.project_id,
                "scheduled_at": session.scheduled_at,
                "room": session.room,
            })),
    );

    Ok(session)
}

/// Mark a session as held. Moves the project to `defense_completed`, and
/// straight on to `completed` when the evaluation ledger already has every
/// required score (a pre-thesis, or a thesis whose committee graded early).
pub async fn complete(
    state: &AppState,
    session_id: DbId,
    input: &CompleteDefenseRequest,
    actor: &Actor,
) -> AppResult<(DefenseSession, Project)> {
    let mut tx = state.pool.begin().await?;
    let session = DefenseSessionRepo::find_by_id(&mut *tx, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DefenseSession",
            id: session_id,
        }))?;

    let mut ctx = lock_context(&mut tx, session.project_id).await?;
    let session = DefenseSessionRepo::find_by_id(&mut *tx, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DefenseSession",
            id: session_id,
        }))?;

    validate_completable(parse_session_status(&session)?)?;

    ctx.status
        .validate_transition(ProjectStatus::DefenseCompleted)
        .map_err(|e| AppError::Core(CoreError::InvalidState(e)))?;

    let session = DefenseSessionRepo::set_status(
        &mut *tx,
        session_id,
        SessionStatus::Completed.as_str(),
        input.notes.as_deref(),
    )
    .await?;
    let project = ProjectRepo::set_status(
        &mut *tx,
        ctx.project.id,
        ProjectStatus::DefenseCompleted.as_str(),
    )
    .await?;

    ctx.status = ProjectStatus::DefenseCompleted;
    ctx.project = project;
    let finalized = try_finalize(&mut tx, &ctx).await?;
    let project = finalized.clone().unwrap_or(ctx.project);

    tx.commit().await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_DEFENSE_COMPLETED)
            .with_source("defense_session", session.id)
            .with_actor(actor.teacher_id)
            .with_payload(json!({ "project_id": session.project_id })),
    );

    if let Some(completed) = finalized {
        state.event_bus.publish(
            DomainEvent::new(EVENT_PROJECT_COMPLETED)
                .with_source("project", session.project_id)
                .with_actor(actor.teacher_id)
                .with_payload(json!({ "final_score": completed.final_score })),
        );
    }

    Ok((session, project))
}
