pub mod defense;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list, create
/// /projects/{id}                                   full aggregate (GET)
/// /projects/{id}/cancel                            cancel (POST)
/// /projects/{id}/eligibility                       gate decisions (GET)
/// /projects/{project_id}/assignments               list, assign
/// /projects/{project_id}/assignments/{teacher_id}  remove (DELETE)
/// /projects/{project_id}/evaluations               list, submit
/// /projects/{project_id}/defense                   schedule (POST)
///
/// /defense-sessions/{id}                           reschedule (PUT)
/// /defense-sessions/{id}/complete                  complete (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/defense-sessions", defense::router())
}
