//! JSON file implementation of the `EventStore` trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use storymap_core::error::StoryError;
use storymap_core::event::EventRecord;
use storymap_core::repository::EventStore;

/// Event store backed by a JSON file holding an array of event records.
///
/// The file is re-read on every fetch, so edits show up on the next request.
#[derive(Debug, Clone)]
pub struct JsonFileEventStore {
    path: PathBuf,
}

impl JsonFileEventStore {
    /// Creates a store reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventStore for JsonFileEventStore {
    async fn fetch_events(&self, genre: Option<&str>) -> Result<Vec<EventRecord>, StoryError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            StoryError::Infrastructure(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let values: Vec<serde_json::Value> = serde_json::from_slice(&bytes).map_err(|e| {
            StoryError::Infrastructure(format!("cannot parse {}: {e}", self.path.display()))
        })?;

        // A malformed element only costs that record.
        let matching: Vec<EventRecord> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<EventRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed story event");
                    None
                }
            })
            .filter(|record| genre.is_none_or(|genre| record.genre == genre))
            .collect();

        debug!(records = matching.len(), ?genre, "loaded story events from file");
        Ok(matching)
    }

    fn backend(&self) -> &'static str {
        "json_file"
    }
}
