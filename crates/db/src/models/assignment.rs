//! Committee role assignment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gradus_core::types::{DbId, Timestamp};

/// A row from the `assignments` table.
///
/// The supervisor never appears here; it is implicit from
/// `projects.supervisor_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub project_id: DbId,
    pub teacher_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}

/// Request body for assigning a teacher to a project role.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignRequest {
    pub teacher_id: DbId,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_request_deserializes_from_json() {
        let input: AssignRequest =
            serde_json::from_str(r#"{"teacher_id": 5, "role": "reviewer"}"#).unwrap();
        assert_eq!(input.teacher_id, 5);
        assert_eq!(input.role, "reviewer");
    }
}
