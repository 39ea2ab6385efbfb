//! Handlers for the evaluation ledger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use gradus_core::types::DbId;
use gradus_db::models::evaluation::{Evaluation, SubmitEvaluationRequest};
use gradus_db::models::project::Project;
use gradus_db::repositories::EvaluationRepo;

use crate::actor::Actor;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::evaluations;

/// Result of a submission: the recorded evaluation plus the project, which
/// may have just been closed by this score.
#[derive(Debug, Serialize)]
pub struct SubmissionOutcome {
    pub evaluation: Evaluation,
    pub project: Project,
}

/// POST /api/v1/projects/{project_id}/evaluations
///
/// Submit (or re-submit) an evaluation as the acting teacher.
pub async fn submit(
    actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<SubmitEvaluationRequest>,
) -> AppResult<impl IntoResponse> {
    let (evaluation, project) = evaluations::submit(&state, project_id, &input, &actor).await?;

    tracing::info!(
        actor_id = actor.teacher_id,
        project_id = project_id,
        role = %evaluation.role,
        score = evaluation.score,
        project_status = %project.status,
        "Evaluation submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmissionOutcome {
                evaluation,
                project,
            },
        }),
    ))
}

/// GET /api/v1/projects/{project_id}/evaluations
///
/// List the project's evaluations, oldest submission first.
pub async fn list(
    _actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let evaluations = EvaluationRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: evaluations }))
}
