//! Handlers for defense session scheduling.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use gradus_core::types::DbId;
use gradus_db::models::defense_session::{
    CompleteDefenseRequest, DefenseSession, RescheduleDefenseRequest, ScheduleDefenseRequest,
};
use gradus_db::models::project::Project;

use crate::actor::Actor;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::defense;

/// A session change together with the project it advanced.
#[derive(Debug, Serialize)]
pub struct DefenseOutcome {
    pub session: DefenseSession,
    pub project: Project,
}

/// POST /api/v1/projects/{project_id}/defense
///
/// Schedule the defense session. Moves the project to `defense_scheduled`.
pub async fn schedule(
    actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<ScheduleDefenseRequest>,
) -> AppResult<impl IntoResponse> {
    let (session, project) = defense::schedule(&state, project_id, &input, &actor).await?;

    tracing::info!(
        actor_id = actor.teacher_id,
        project_id = project_id,
        session_id = session.id,
        scheduled_at = %session.scheduled_at,
        "Defense scheduled"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DefenseOutcome { session, project },
        }),
    ))
}

/// PUT /api/v1/defense-sessions/{id}
///
/// Rebook a session that is still `scheduled`. Project status is
/// unchanged.
pub async fn reschedule(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RescheduleDefenseRequest>,
) -> AppResult<impl IntoResponse> {
    let session = defense::reschedule(&state, id, &input, &actor).await?;

    tracing::info!(
        actor_id = actor.teacher_id,
        session_id = id,
        scheduled_at = %session.scheduled_at,
        "Defense rescheduled"
    );

    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/defense-sessions/{id}/complete
///
/// Mark the defense as held. Moves the project to `defense_completed`
/// (and on to `completed` when the ledger is already full).
pub async fn complete(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CompleteDefenseRequest>,
) -> AppResult<impl IntoResponse> {
    let (session, project) = defense::complete(&state, id, &input, &actor).await?;

    tracing::info!(
        actor_id = actor.teacher_id,
        session_id = id,
        project_status = %project.status,
        "Defense completed"
    );

    Ok(Json(DataResponse {
        data: DefenseOutcome { session, project },
    }))
}
