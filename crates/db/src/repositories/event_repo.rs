//! Repository for the `events` table.

use sqlx::PgExecutor;

use gradus_core::types::DbId;

use crate::models::event::Event;

const COLUMNS: &str =
    "id, event_type, source_entity_type, source_entity_id, actor_teacher_id, payload, created_at";

/// Provides query operations for persisted domain events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a single event row.
    pub async fn insert(
        executor: impl PgExecutor<'_>,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_teacher_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (event_type, source_entity_type, source_entity_id,
                                 actor_teacher_id, payload)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(event_type)
            .bind(source_entity_type)
            .bind(source_entity_id)
            .bind(actor_teacher_id)
            .bind(payload)
            .fetch_one(executor)
            .await
    }

    /// List the most recent events for an entity, newest first.
    pub async fn list_for_entity(
        executor: impl PgExecutor<'_>,
        entity_type: &str,
        entity_id: DbId,
        limit: i64,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE source_entity_type = $1 AND source_entity_id = $2
             ORDER BY created_at DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .bind(limit)
            .fetch_all(executor)
            .await
    }
}
