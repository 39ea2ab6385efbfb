//! Handlers for the project lifecycle resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use gradus_core::eligibility::{can_assign_committee, can_schedule_defense, GateDecision};
use gradus_core::error::CoreError;
use gradus_core::types::DbId;
use gradus_db::models::project::{CreateProject, UpdateProject};
use gradus_db::repositories::{EventRepo, ProjectRepo};

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::{self, entries_of, lifecycle, parse_kind, parse_status};

/// Both workflow gates for a project, for callers rendering the next
/// available action. "Not yet eligible" is a normal value here, never an
/// error status.
#[derive(Debug, Serialize)]
pub struct EligibilityReport {
    pub can_assign_committee: GateDecision,
    pub can_schedule_defense: GateDecision,
}

/// POST /api/v1/projects
///
/// Register an accepted topic application as a new project.
pub async fn create(
    actor: Actor,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    let project = lifecycle::create(&state, &input).await?;

    tracing::info!(
        actor_id = actor.teacher_id,
        project_id = project.id,
        kind = %project.kind,
        "Project registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
///
/// List all projects, most recently created first.
pub async fn list(
    _actor: Actor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
///
/// Full aggregate: project, assignments, evaluations, defense session,
/// and the derived pre-defense score. This is the read accessor the
/// reporting collaborator consumes.
pub async fn get_by_id(
    _actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let aggregate = workflow::load_aggregate(&state.pool, id).await?;
    Ok(Json(DataResponse { data: aggregate }))
}

/// GET /api/v1/projects/{id}/eligibility
///
/// Current gate decisions, recomputed from live assignment/evaluation
/// state.
pub async fn get_eligibility(
    _actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let aggregate = workflow::load_aggregate(&state.pool, id).await?;
    let kind = parse_kind(&aggregate.project)?;
    let status = parse_status(&aggregate.project)?;
    let entries = entries_of(&aggregate.evaluations)?;

    let report = EligibilityReport {
        can_assign_committee: can_assign_committee(
            kind,
            status,
            &entries,
            state.config.pass_threshold,
        ),
        can_schedule_defense: can_schedule_defense(status, &entries, state.config.pass_threshold),
    };

    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/projects/{id}/cancel
///
/// Cancel a project from any pre-completion state.
pub async fn cancel(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = lifecycle::cancel(&state, id, &actor).await?;

    tracing::info!(
        actor_id = actor.teacher_id,
        project_id = id,
        "Project cancelled"
    );

    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
///
/// Update mutable project fields (title, closing feedback). Lifecycle
/// fields are only ever changed through the workflow operations.
pub async fn update(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(
        actor_id = actor.teacher_id,
        project_id = id,
        "Project updated"
    );

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Hard-delete a project record and everything hanging off it. Not part
/// of the normal lifecycle; use cancel for that.
pub async fn delete(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProjectRepo::hard_delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(
        actor_id = actor.teacher_id,
        project_id = id,
        "Project hard-deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/events
///
/// Recent domain events recorded for the project, newest first.
pub async fn get_events(
    _actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_for_entity(&state.pool, "project", id, 50).await?;
    Ok(Json(DataResponse { data: events }))
}
