//! `PostgreSQL` implementation of the `EventStore` trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, warn};

use storymap_core::error::StoryError;
use storymap_core::event::{EventRecord, normalize_start_flag};
use storymap_core::repository::EventStore;

use crate::schema::{CREATE_STORY_EVENTS_TABLE, SELECT_STORY_EVENTS};

/// PostgreSQL-backed event store.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Creates a new `PgEventStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `story_events` table and its index if they are missing.
    ///
    /// # Errors
    ///
    /// Returns the database error if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(CREATE_STORY_EVENTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn fetch_events(&self, genre: Option<&str>) -> Result<Vec<EventRecord>, StoryError> {
        let rows = sqlx::query(SELECT_STORY_EVENTS)
            .bind(genre)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoryError::Infrastructure(format!("event query failed: {e}")))?;

        debug!(rows = rows.len(), ?genre, "loaded story events");

        let records = rows
            .iter()
            .filter_map(|row| match record_from_row(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "skipping undecodable story event row");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

fn record_from_row(row: &PgRow) -> Result<EventRecord, sqlx::Error> {
    let is_start: Option<serde_json::Value> = row.try_get("is_start")?;
    Ok(EventRecord {
        event_id: row.try_get("event_id")?,
        text: row.try_get("text")?,
        genre: row.try_get("genre")?,
        next_event_ids: row.try_get("next_event_ids")?,
        is_start: is_start.as_ref().is_some_and(normalize_start_flag),
    })
}
