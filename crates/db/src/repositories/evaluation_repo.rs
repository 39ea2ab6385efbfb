//! Repository for the `evaluations` table.

use sqlx::PgExecutor;

use gradus_core::types::DbId;

use crate::models::evaluation::Evaluation;

const COLUMNS: &str = "id, project_id, teacher_id, role, score, comments, submitted_at";

/// Provides query operations for the evaluation ledger.
pub struct EvaluationRepo;

impl EvaluationRepo {
    /// Record an evaluation, replacing any prior record for the same
    /// `(project, role, teacher)` key. Last write wins; `submitted_at` is
    /// refreshed on replacement.
    pub async fn upsert(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
        teacher_id: DbId,
        role: &str,
        score: f64,
        comments: Option<&str>,
    ) -> Result<Evaluation, sqlx::Error> {
        let query = format!(
            "INSERT INTO evaluations (project_id, teacher_id, role, score, comments)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (project_id, role, teacher_id)
             DO UPDATE SET score = EXCLUDED.score,
                           comments = EXCLUDED.comments,
                           submitted_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Evaluation>(&query)
            .bind(project_id)
            .bind(teacher_id)
            .bind(role)
            .bind(score)
            .bind(comments)
            .fetch_one(executor)
            .await
    }

    /// List all evaluations for a project, oldest submission first.
    pub async fn list_for_project(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Vec<Evaluation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evaluations WHERE project_id = $1 ORDER BY submitted_at"
        );
        sqlx::query_as::<_, Evaluation>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }
}
