//! Test stores — mock `EventStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storymap_core::error::StoryError;
use storymap_core::event::EventRecord;
use storymap_core::repository::EventStore;

/// An event store holding records in memory. Filters by genre the way a real
/// store would and records every genre it was asked for.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    records: Vec<EventRecord>,
    requested: Mutex<Vec<Option<String>>>,
}

impl InMemoryEventStore {
    /// Create a store that serves `records`.
    #[must_use]
    pub fn new(records: Vec<EventRecord>) -> Self {
        Self {
            records,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the genre filters passed to `fetch_events`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested_genres(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn fetch_events(&self, genre: Option<&str>) -> Result<Vec<EventRecord>, StoryError> {
        self.requested
            .lock()
            .unwrap()
            .push(genre.map(str::to_owned));
        Ok(self
            .records
            .iter()
            .filter(|record| genre.is_none_or(|genre| record.genre == genre))
            .cloned()
            .collect())
    }

    fn backend(&self) -> &'static str {
        "in_memory"
    }
}

/// An event store that never holds any records.
#[derive(Debug)]
pub struct EmptyEventStore;

#[async_trait]
impl EventStore for EmptyEventStore {
    async fn fetch_events(&self, _genre: Option<&str>) -> Result<Vec<EventRecord>, StoryError> {
        Ok(vec![])
    }

    fn backend(&self) -> &'static str {
        "empty"
    }
}

/// An event store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingEventStore;

#[async_trait]
impl EventStore for FailingEventStore {
    async fn fetch_events(&self, _genre: Option<&str>) -> Result<Vec<EventRecord>, StoryError> {
        Err(StoryError::Infrastructure("connection refused".into()))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
