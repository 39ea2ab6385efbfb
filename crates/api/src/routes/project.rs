//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assignment, defense, evaluation, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                    -> list
/// POST   /                                    -> create
/// GET    /{id}                                -> get_by_id (full aggregate)
/// PUT    /{id}                                -> update
/// DELETE /{id}                                -> delete (hard delete)
/// POST   /{id}/cancel                         -> cancel
/// GET    /{id}/eligibility                    -> get_eligibility
/// GET    /{id}/events                         -> get_events
///
/// GET    /{project_id}/assignments            -> list
/// POST   /{project_id}/assignments            -> assign
/// DELETE /{project_id}/assignments/{teacher_id} -> remove
///
/// GET    /{project_id}/evaluations            -> list
/// POST   /{project_id}/evaluations            -> submit
///
/// POST   /{project_id}/defense                -> schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/cancel", post(project::cancel))
        .route("/{id}/eligibility", get(project::get_eligibility))
        .route("/{id}/events", get(project::get_events))
        .route(
            "/{project_id}/assignments",
            get(assignment::list).post(assignment::assign),
        )
        .route(
            "/{project_id}/assignments/{teacher_id}",
            axum::routing::delete(assignment::remove),
        )
        .route(
            "/{project_id}/evaluations",
            get(evaluation::list).post(evaluation::submit),
        )
        .route("/{project_id}/defense", post(defense::schedule))
}
