//! Storymap event stores.
//!
//! Read-only adapters that serve story event records to the narrative
//! engine.

pub mod json_file_store;
pub mod pg_event_store;
pub mod schema;
