//! Project registration and cancellation.

use serde_json::json;

use gradus_core::defense::SessionStatus;
use gradus_core::error::CoreError;
use gradus_core::project::{ProjectKind, ProjectStatus};
use gradus_core::types::DbId;
use gradus_db::models::project::{CreateProject, Project};
use gradus_db::repositories::{DefenseSessionRepo, ProjectRepo};
use gradus_events::bus::{DomainEvent, EVENT_PROJECT_CANCELLED};

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::workflow::lock_context;

/// Maximum length for a project title.
pub const MAX_TITLE_LENGTH: usize = 300;

/// Register an accepted topic application as a project.
///
/// The project starts in `in_progress`; student, supervisor, and semester
/// ids were validated by the registry collaborator upstream.
pub async fn create(state: &AppState, input: &CreateProject) -> AppResult<Project> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".to_string(),
        )));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ))));
    }
    ProjectKind::from_str_value(&input.kind)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let project =
        ProjectRepo::create(&state.pool, input, ProjectStatus::InProgress.as_str()).await?;
    Ok(project)
}

/// Cancel a project from any pre-completion state.
///
/// Also cancels the active defense session, if one exists, in the same
/// transaction. Evaluations are retained for the audit trail.
pub async fn cancel(state: &AppState, project_id: DbId, actor: &Actor) -> AppResult<Project> {
    let mut tx = state.pool.begin().await?;
    let ctx = lock_context(&mut tx, project_id).await?;

    ctx.status
        .validate_transition(ProjectStatus::Cancelled)
        .map_err(|e| AppError::Core(CoreError::InvalidState(e)))?;

    if let Some(session) = DefenseSessionRepo::find_active_for_project(&mut *tx, project_id).await?
    {
        if session.status == SessionStatus::Scheduled.as_str() {
            DefenseSessionRepo::set_status(
                &mut *tx,
                session.id,
                SessionStatus::Cancelled.as_str(),
                None,
            )
            .await?;
        }
    }

    let project =
        ProjectRepo::set_status(&mut *tx, project_id, ProjectStatus::Cancelled.as_str()).await?;
    tx.commit().await?;

    state.event_bus.publish(
        DomainEvent::new(EVENT_PROJECT_CANCELLED)
            .with_source("project", project_id)
            .with_actor(actor.teacher_id)
            .with_payload(json!({ "previous_status": ctx.status.as_str() })),
    );

    Ok(project)
}
