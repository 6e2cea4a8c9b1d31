//! Shared test mocks and fixtures for the Storymap narrative engine.

mod fixtures;
mod rng;
mod store;

pub use fixtures::{event, start_event};
pub use rng::{MockRng, MockRngFactory, SeededRngFactory, SequenceRng};
pub use store::{EmptyEventStore, FailingEventStore, InMemoryEventStore};
