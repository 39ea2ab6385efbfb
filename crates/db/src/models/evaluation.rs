//! Evaluation ledger model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gradus_core::types::{DbId, Timestamp};

/// A row from the `evaluations` table.
///
/// Unique per `(project_id, role, teacher_id)`; re-submission replaces the
/// prior record (last write wins) and refreshes `submitted_at`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Evaluation {
    pub id: DbId,
    pub project_id: DbId,
    pub teacher_id: DbId,
    pub role: String,
    pub score: f64,
    pub comments: Option<String>,
    pub submitted_at: Timestamp,
}

/// Request body for submitting (or re-submitting) an evaluation.
///
/// The acting teacher comes from the actor headers, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEvaluationRequest {
    pub role: String,
    pub score: f64,
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_deserializes_from_json() {
        let input: SubmitEvaluationRequest = serde_json::from_str(
            r#"{"role": "supervisor", "score": 87.5, "comments": "strong experimental work"}"#,
        )
        .unwrap();
        assert_eq!(input.role, "supervisor");
        assert_eq!(input.score, 87.5);
    }

    #[test]
    fn comments_are_optional() {
        let input: SubmitEvaluationRequest =
            serde_json::from_str(r#"{"role": "reviewer", "score": 60}"#).unwrap();
        assert!(input.comments.is_none());
    }
}
