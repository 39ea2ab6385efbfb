//! Repository for the `defense_sessions` table.

use sqlx::PgExecutor;

use gradus_core::defense::SESSION_CANCELLED;
use gradus_core::types::{DbId, Timestamp};

use crate::models::defense_session::DefenseSession;

const COLUMNS: &str = "id, project_id, scheduled_at, room, notes, status, created_at, updated_at";

/// Provides query operations for defense sessions.
pub struct DefenseSessionRepo;

impl DefenseSessionRepo {
    /// Insert a new session in the given status.
    pub async fn insert(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
        scheduled_at: Timestamp,
        room: &str,
        notes: Option<&str>,
        status: &str,
    ) -> Result<DefenseSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO defense_sessions (project_id, scheduled_at, room, notes, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DefenseSession>(&query)
            .bind(project_id)
            .bind(scheduled_at)
            .bind(room)
            .bind(notes)
            .bind(status)
            .fetch_one(executor)
            .await
    }

    /// Find a session by its internal ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<DefenseSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM defense_sessions WHERE id = $1");
        sqlx::query_as::<_, DefenseSession>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// The project's single non-cancelled session, if one exists.
    pub async fn find_active_for_project(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Option<DefenseSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM defense_sessions
             WHERE project_id = $1 AND status <> '{SESSION_CANCELLED}'"
        );
        sqlx::query_as::<_, DefenseSession>(&query)
            .bind(project_id)
            .fetch_optional(executor)
            .await
    }

    /// Rebook a session's time, room, and notes. Status is untouched.
    pub async fn update_booking(
        executor: impl PgExecutor<'_>,
        id: DbId,
        scheduled_at: Timestamp,
        room: &str,
        notes: Option<&str>,
    ) -> Result<DefenseSession, sqlx::Error> {
        let query = format!(
            "UPDATE defense_sessions
             SET scheduled_at = $2, room = $3, notes = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DefenseSession>(&query)
            .bind(id)
            .bind(scheduled_at)
            .bind(room)
            .bind(notes)
            .fetch_one(executor)
            .await
    }

    /// Move a session to a new status, optionally appending closing notes.
    pub async fn set_status(
        executor: impl PgExecutor<'_>,
        id: DbId,
        status: &str,
        notes: Option<&str>,
    ) -> Result<DefenseSession, sqlx::Error> {
        let query = format!(
            "UPDATE defense_sessions
             SET status = $2, notes = COALESCE($3, notes), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DefenseSession>(&query)
            .bind(id)
            .bind(status)
            .bind(notes)
            .fetch_one(executor)
            .await
    }
}
