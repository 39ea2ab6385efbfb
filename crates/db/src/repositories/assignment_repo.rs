//! Repository for the `assignments` table.

use sqlx::PgExecutor;

use gradus_core::types::DbId;

use crate::models::assignment::Assignment;

const COLUMNS: &str = "id, project_id, teacher_id, role, created_at";

/// Provides query operations for committee role assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert a new role assignment.
    pub async fn insert(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
        teacher_id: DbId,
        role: &str,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (project_id, teacher_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(project_id)
            .bind(teacher_id)
            .bind(role)
            .fetch_one(executor)
            .await
    }

    /// List all assignments for a project, reviewer first.
    pub async fn list_for_project(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments WHERE project_id = $1 ORDER BY role, teacher_id"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Find a specific teacher's assignment on a project.
    pub async fn find(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
        teacher_id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assignments WHERE project_id = $1 AND teacher_id = $2");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(project_id)
            .bind(teacher_id)
            .fetch_optional(executor)
            .await
    }

    /// Remove a teacher's assignment. Returns `true` if a row was removed.
    pub async fn delete(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
        teacher_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM assignments WHERE project_id = $1 AND teacher_id = $2")
                .bind(project_id)
                .bind(teacher_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
