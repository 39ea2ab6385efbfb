//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gradus_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
///
/// `kind` and `status` hold the string values defined in
/// `gradus_core::project`; the workflow layer is the only writer and goes
/// through the core enums, so undefined strings never reach this struct.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub kind: String,
    pub status: String,
    pub student_id: DbId,
    pub supervisor_id: DbId,
    pub semester_id: DbId,
    pub final_score: Option<f64>,
    pub feedback: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an accepted topic application as a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub kind: String,
    pub student_id: DbId,
    pub supervisor_id: DbId,
    pub semester_id: DbId,
}

/// DTO for updating mutable project fields. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub feedback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_project_deserializes_from_json() {
        let input: CreateProject = serde_json::from_str(
            r#"{
                "title": "Adaptive query optimization",
                "kind": "thesis",
                "student_id": 11,
                "supervisor_id": 3,
                "semester_id": 7
            }"#,
        )
        .unwrap();
        assert_eq!(input.kind, "thesis");
        assert_eq!(input.supervisor_id, 3);
    }

    #[test]
    fn update_project_fields_default_to_none() {
        let input: UpdateProject = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.feedback.is_none());
    }
}
