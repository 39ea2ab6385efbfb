//! Route definitions for the `/defense-sessions` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::defense;
use crate::state::AppState;

/// Routes mounted at `/defense-sessions`.
///
/// ```text
/// PUT    /{id}           -> reschedule
/// POST   /{id}/complete  -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(defense::reschedule))
        .route("/{id}/complete", post(defense::complete))
}
