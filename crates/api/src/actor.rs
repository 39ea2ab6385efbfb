//! Acting-teacher extraction.
//!
//! Identity and role resolution live in the upstream gateway; by the time
//! a request reaches this service the actor is already authenticated and
//! their staff role resolved. The gateway forwards both as headers, and
//! [`Actor`] is the only place they are read — operations receive the
//! capability explicitly instead of re-deriving roles ad hoc.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gradus_core::error::CoreError;
use gradus_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the acting teacher's registry id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Header carrying the acting teacher's staff role (e.g. `administrator`).
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// The authenticated teacher performing the current request.
#[derive(Debug, Clone)]
pub struct Actor {
    pub teacher_id: DbId,
    pub role: String,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let teacher_id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<DbId>().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::UnauthorizedRole(format!(
                    "Missing or malformed {ACTOR_ID_HEADER} header"
                )))
            })?;

        let role = parts
            .headers
            .get(ACTOR_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Core(CoreError::UnauthorizedRole(format!(
                    "Missing {ACTOR_ROLE_HEADER} header"
                )))
            })?;

        Ok(Actor { teacher_id, role })
    }
}
