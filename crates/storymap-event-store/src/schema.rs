//! Event store database schema.

/// SQL to create the story events table.
///
/// `event_id` is nullable and `is_start` is raw JSON so that dirty records
/// survive ingestion; the engine skips and normalizes them on read.
pub const CREATE_STORY_EVENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS story_events (
    id              BIGSERIAL PRIMARY KEY,
    event_id        TEXT,
    text            TEXT NOT NULL DEFAULT '',
    genre           TEXT NOT NULL DEFAULT '',
    next_event_ids  TEXT[] NOT NULL DEFAULT '{}',
    is_start        JSONB
);

CREATE INDEX IF NOT EXISTS idx_story_events_genre
    ON story_events (genre);
";

/// Reads every record, optionally filtered by genre.
pub const SELECT_STORY_EVENTS: &str = r"
SELECT event_id, text, genre, next_event_ids, is_start
FROM story_events
WHERE ($1::TEXT IS NULL OR genre = $1)
";
