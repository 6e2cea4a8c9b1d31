//! Record fixtures.

use storymap_core::event::EventRecord;

/// Builds a non-start `horror` record whose text is `"text of <id>"`.
#[must_use]
pub fn event(id: &str, next: &[&str]) -> EventRecord {
    EventRecord {
        event_id: Some(id.to_owned()),
        text: format!("text of {id}"),
        genre: "horror".to_owned(),
        next_event_ids: next.iter().map(|&next| next.to_owned()).collect(),
        is_start: false,
    }
}

/// Same as [`event`], marked as a start node.
#[must_use]
pub fn start_event(id: &str, next: &[&str]) -> EventRecord {
    EventRecord {
        is_start: true,
        ..event(id, next)
    }
}
