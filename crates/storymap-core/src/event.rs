//! Story event records as supplied by the event store.

use serde::{Deserialize, Deserializer, Serialize};

/// One narrative unit: a node of the story graph.
///
/// Records are read-only for the engine. Dirty data is tolerated: a missing
/// identifier is kept as `None` and skipped when the graph is built, and
/// null text, genre, or successor lists deserialize to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Identifier, unique within a genre.
    #[serde(default)]
    pub event_id: Option<String>,
    /// Opaque narrative content.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Classification tag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: String,
    /// Ordered outgoing transitions. Empty for a story-ending event.
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_event_ids: Vec<String>,
    /// Whether the event may begin a story.
    #[serde(default, deserialize_with = "deserialize_start_flag")]
    pub is_start: bool,
}

impl EventRecord {
    /// Returns the identifier if it is present and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.event_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Normalizes a raw `is_start` value.
///
/// Only a boolean `true` or a string equal to `"true"` (ignoring ASCII case)
/// marks a start node. Every other value, including null, is `false`.
#[must_use]
pub fn normalize_start_flag(raw: &serde_json::Value) -> bool {
    match raw {
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn deserialize_start_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(normalize_start_flag(&raw))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
