//! Story graph construction.

use std::collections::{HashMap, HashSet};

use storymap_core::event::EventRecord;

/// Mapping from event identifier to its ordered successor identifiers.
pub type Adjacency = HashMap<String, Vec<String>>;

/// Directed story graph for one genre.
#[derive(Debug, Clone, Default)]
pub struct StoryGraph {
    adjacency: Adjacency,
    starts: Vec<String>,
}

impl StoryGraph {
    /// Builds the graph from flat records.
    ///
    /// Records without an identifier are skipped. A repeated identifier
    /// replaces the earlier successor list; `starts` keeps ingestion order
    /// and never holds the same identifier twice.
    #[must_use]
    pub fn from_records(records: &[EventRecord]) -> Self {
        let mut adjacency = Adjacency::with_capacity(records.len());
        let mut starts = Vec::new();
        let mut seen_starts = HashSet::new();

        for record in records {
            let Some(id) = record.id() else {
                continue;
            };
            adjacency.insert(id.to_owned(), record.next_event_ids.clone());
            if record.is_start && seen_starts.insert(id) {
                starts.push(id.to_owned());
            }
        }

        Self { adjacency, starts }
    }

    /// Returns the adjacency structure.
    #[must_use]
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Returns the start nodes.
    #[must_use]
    pub fn starts(&self) -> &[String] {
        &self.starts
    }

    /// Returns `true` when the graph has no keyed nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Successors of `id`, empty for leaves and unknown nodes.
    #[must_use]
    pub fn successors(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }

    /// Whether `id` is a node: either a key or a successor of some key.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
            || self
                .adjacency
                .values()
                .any(|next| next.iter().any(|successor| successor == id))
    }
}

/// Point-in-time map from identifier to full record.
#[derive(Debug, Clone, Default)]
pub struct EventLookup {
    events: HashMap<String, EventRecord>,
}

impl EventLookup {
    /// Indexes `records` by identifier. Records without one are skipped; the
    /// last record wins on duplicates, matching [`StoryGraph::from_records`].
    #[must_use]
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        let events = records
            .into_iter()
            .filter_map(|record| Some((record.id()?.to_owned(), record)))
            .collect();
        Self { events }
    }

    /// Resolves an identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EventRecord> {
        self.events.get(id)
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` when no record is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Graph and lookup built together from one fetch.
#[derive(Debug, Clone, Default)]
pub struct GenreSnapshot {
    /// The story graph.
    pub graph: StoryGraph,
    /// Full records by identifier.
    pub lookup: EventLookup,
}

impl GenreSnapshot {
    /// Builds both structures from the same records.
    #[must_use]
    pub fn build(records: Vec<EventRecord>) -> Self {
        let graph = StoryGraph::from_records(&records);
        let lookup = EventLookup::from_records(records);
        Self { graph, lookup }
    }
}
