//! Event store abstraction.

use async_trait::async_trait;

use crate::error::StoryError;
use crate::event::EventRecord;

/// Read-only source of story event records.
///
/// Implementations must not mutate stored data. The order of the returned
/// records is not guaranteed and the engine does not rely on it. Retry
/// policy, if any, belongs to the implementation.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Fetch every record for `genre`, or every record when `genre` is `None`.
    async fn fetch_events(&self, genre: Option<&str>) -> Result<Vec<EventRecord>, StoryError>;

    /// Short name of the backing storage, reported by the health check.
    fn backend(&self) -> &'static str;
}
