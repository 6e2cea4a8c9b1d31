//! Shared application state.

use std::sync::Arc;

use storymap_core::repository::EventStore;
use storymap_core::rng::RngFactory;
use storymap_narrative::domain::path::SearchBounds;

/// Application state shared across all request handlers.
///
/// Holds no per-request data: every handler builds its own graph from the
/// store and draws its own generator from `rng_factory`.
#[derive(Clone)]
pub struct AppState {
    /// Source of story event records.
    pub event_store: Arc<dyn EventStore>,
    /// Creates an independently seeded generator per request.
    pub rng_factory: Arc<dyn RngFactory>,
    /// Length bounds for constrained story generation.
    pub bounds: SearchBounds,
    /// Default number of start options offered.
    pub start_options_limit: usize,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        event_store: Arc<dyn EventStore>,
        rng_factory: Arc<dyn RngFactory>,
        bounds: SearchBounds,
        start_options_limit: usize,
    ) -> Self {
        Self {
            event_store,
            rng_factory,
            bounds,
            start_options_limit,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("bounds", &self.bounds)
            .field("start_options_limit", &self.start_options_limit)
            .finish_non_exhaustive()
    }
}
