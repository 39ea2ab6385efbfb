//! Repository for the `projects` table.

use sqlx::PgExecutor;

use gradus_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, kind, status, student_id, supervisor_id, semester_id, \
                       final_score, feedback, created_at, updated_at";

/// Provides query operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in the initial `in_progress` status.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateProject,
        status: &str,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, kind, status, student_id, supervisor_id, semester_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.kind)
            .bind(status)
            .bind(input.student_id)
            .bind(input.supervisor_id)
            .bind(input.semester_id)
            .fetch_one(executor)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a project and take the row lock that serializes all workflow
    /// mutations for it. Must run inside a transaction.
    pub async fn find_by_id_for_update(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query)
            .fetch_all(executor)
            .await
    }

    /// Update mutable fields. Only non-`None` fields in `input` are applied.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                feedback = COALESCE($3, feedback),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.feedback)
            .fetch_optional(executor)
            .await
    }

    /// Move a project to a new lifecycle status.
    pub async fn set_status(
        executor: impl PgExecutor<'_>,
        id: DbId,
        status: &str,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Record the final score together with the closing status change.
    pub async fn finalize(
        executor: impl PgExecutor<'_>,
        id: DbId,
        status: &str,
        final_score: f64,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $2, final_score = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status)
            .bind(final_score)
            .fetch_one(executor)
            .await
    }

    /// Permanently delete a project. Returns `true` if a row was removed.
    ///
    /// Cascades to assignments, evaluations, and defense sessions; not part
    /// of the normal lifecycle.
    pub async fn hard_delete(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
