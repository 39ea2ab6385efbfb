//! Handlers for committee role assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use gradus_core::types::DbId;
use gradus_db::models::assignment::AssignRequest;
use gradus_db::repositories::AssignmentRepo;

use crate::actor::Actor;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::assignments;

/// POST /api/v1/projects/{project_id}/assignments
///
/// Assign a reviewer or committee member. Committee assignment is gated
/// on a passing pre-defense score.
pub async fn assign(
    actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<impl IntoResponse> {
    let assignment = assignments::assign(&state, project_id, &input, &actor).await?;

    tracing::info!(
        actor_id = actor.teacher_id,
        project_id = project_id,
        teacher_id = input.teacher_id,
        role = %assignment.role,
        "Role assigned"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// GET /api/v1/projects/{project_id}/assignments
///
/// List the project's role assignments.
pub async fn list(
    _actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignments = AssignmentRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// DELETE /api/v1/projects/{project_id}/assignments/{teacher_id}
///
/// Remove a teacher's role assignment. Locked once the defense has been
/// completed.
pub async fn remove(
    actor: Actor,
    State(state): State<AppState>,
    Path((project_id, teacher_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    assignments::remove(&state, project_id, teacher_id, &actor).await?;

    tracing::info!(
        actor_id = actor.teacher_id,
        project_id = project_id,
        teacher_id = teacher_id,
        "Role assignment removed"
    );

    Ok(StatusCode::NO_CONTENT)
}
