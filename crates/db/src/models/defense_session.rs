//! Defense session model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gradus_core::types::{DbId, Timestamp};

/// A row from the `defense_sessions` table.
///
/// At most one row per project has a status other than `cancelled`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DefenseSession {
    pub id: DbId,
    pub project_id: DbId,
    pub scheduled_at: Timestamp,
    pub room: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for scheduling a defense session.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDefenseRequest {
    pub scheduled_at: Timestamp,
    pub room: String,
    pub notes: Option<String>,
}

/// Request body for rescheduling an existing session.
#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleDefenseRequest {
    pub scheduled_at: Timestamp,
    pub room: String,
    pub notes: Option<String>,
}

/// Request body for completing a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteDefenseRequest {
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_request_deserializes_from_json() {
        let input: ScheduleDefenseRequest = serde_json::from_str(
            r#"{"scheduled_at": "2026-06-15T10:00:00Z", "room": "B-204"}"#,
        )
        .unwrap();
        assert_eq!(input.room, "B-204");
        assert!(input.notes.is_none());
    }

    #[test]
    fn complete_request_accepts_empty_body() {
        let input: CompleteDefenseRequest = serde_json::from_str("{}").unwrap();
        assert!(input.notes.is_none());
    }
}
