//! Query handlers for the narrative graph engine.
//!
//! Every handler fetches the genre's records, rebuilds the graph and lookup
//! from them, and answers from that private snapshot. Nothing is cached
//! between calls and nothing is written back to the store.

use serde::Serialize;
use storymap_core::error::StoryError;
use storymap_core::event::EventRecord;
use storymap_core::repository::EventStore;
use storymap_core::rng::{DeterministicRng, choose, shuffle};
use tracing::{debug, instrument, warn};

use crate::domain::graph::{EventLookup, GenreSnapshot};
use crate::domain::path::{
    SearchBounds, SearchOutcome, Strategy, constrained_search, random_walk,
};
use crate::domain::preview::preview;
use crate::domain::validator::{is_acyclic, unreachable_from_starts};

/// One event of a generated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryNode {
    /// The event identifier.
    pub event_id: String,
    /// Full narrative text.
    pub text: String,
    /// Genre tag of the event.
    pub genre: String,
}

impl StoryNode {
    fn from_record(event_id: &str, record: &EventRecord) -> Self {
        Self {
            event_id: event_id.to_owned(),
            text: record.text.clone(),
            genre: record.genre.clone(),
        }
    }
}

/// A concrete walk through the story graph, start first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StoryPath {
    /// Events in reading order.
    pub nodes: Vec<StoryNode>,
}

impl StoryPath {
    /// Identifiers of the events in reading order.
    #[must_use]
    pub fn event_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.event_id.as_str()).collect()
    }
}

/// An entry point offered to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartOption {
    /// The start event identifier.
    pub event_id: String,
    /// Full narrative text.
    pub text: String,
    /// Truncated text for display.
    pub preview: String,
}

/// A choice reachable in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOption {
    /// The successor event identifier.
    pub event_id: String,
    /// Truncated text for display.
    pub preview: String,
    /// Genre tag of the successor.
    pub genre: String,
}

/// Read-only view of one node and its immediate choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    /// The node being read.
    pub current: StoryNode,
    /// Resolvable successors, in adjacency order.
    pub options: Vec<StepOption>,
    /// `true` when no option remains.
    pub is_terminal: bool,
}

/// Fetches the records for `genre` (all genres when `None`) and builds the
/// graph and lookup from them.
///
/// # Errors
///
/// Returns `StoryError::Infrastructure` if the store cannot be read.
pub async fn build_snapshot(
    genre: Option<&str>,
    store: &dyn EventStore,
) -> Result<GenreSnapshot, StoryError> {
    let records = store.fetch_events(genre).await?;
    debug!(records = records.len(), "fetched event records");
    Ok(GenreSnapshot::build(records))
}

/// Samples up to `limit` distinct start nodes in random order.
///
/// # Errors
///
/// Returns `StoryError::Infrastructure` if the store cannot be read.
#[instrument(skip(store, rng))]
pub async fn list_start_options(
    genre: Option<&str>,
    limit: usize,
    store: &dyn EventStore,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<StartOption>, StoryError> {
    let snapshot = build_snapshot(genre, store).await?;

    let mut starts: Vec<&str> = snapshot.graph.starts().iter().map(String::as_str).collect();
    shuffle(&mut starts, rng);

    let options: Vec<StartOption> = starts
        .into_iter()
        .take(limit)
        .filter_map(|id| {
            let record = snapshot.lookup.get(id)?;
            Some(StartOption {
                event_id: id.to_owned(),
                text: record.text.clone(),
                preview: preview(&record.text),
            })
        })
        .collect();

    debug!(count = options.len(), "sampled start options");
    Ok(options)
}

/// Generates one complete story for `genre`.
///
/// Checks run in order and the first failure wins: the graph must be
/// non-empty, a start node must be given or available, the start node must
/// exist, and the graph must be acyclic. A length-constrained search that
/// finds nothing within `bounds` falls back to a random walk from the same
/// start. Identifiers without a record are dropped from the result.
///
/// # Errors
///
/// Returns `StoryError::EmptyGraph`, `StoryError::NoStartNodes`,
/// `StoryError::InvalidStartNode`, or `StoryError::CycleDetected` when the
/// matching check fails, and `StoryError::Infrastructure` if the store
/// cannot be read.
#[instrument(skip(store, rng))]
pub async fn generate_story(
    genre: Option<&str>,
    strategy: Strategy,
    start_id: Option<&str>,
    bounds: SearchBounds,
    store: &dyn EventStore,
    rng: &mut dyn DeterministicRng,
) -> Result<StoryPath, StoryError> {
    let snapshot = build_snapshot(genre, store).await?;
    let graph = &snapshot.graph;

    if graph.is_empty() {
        return Err(StoryError::EmptyGraph(genre.map(str::to_owned)));
    }

    let start = match start_id {
        Some(id) => id,
        None => choose(graph.starts(), rng)
            .map(String::as_str)
            .ok_or_else(|| StoryError::NoStartNodes(genre.map(str::to_owned)))?,
    };

    if !graph.contains_node(start) {
        return Err(StoryError::InvalidStartNode(start.to_owned()));
    }

    if !is_acyclic(graph.adjacency()) {
        warn!("refusing to generate from a cyclic story graph");
        return Err(StoryError::CycleDetected(genre.map(str::to_owned)));
    }

    let islands = unreachable_from_starts(graph);
    if !islands.is_empty() {
        warn!(count = islands.len(), ?islands, "story graph has nodes no start can reach");
    }

    let ids = match strategy {
        Strategy::Random => random_walk(graph, start, rng),
        Strategy::LengthConstrained => match constrained_search(graph, start, bounds, rng) {
            SearchOutcome::Found(path) => path,
            SearchOutcome::Exhausted => {
                debug!(
                    min_len = bounds.min_len(),
                    max_len = bounds.max_len(),
                    "no path within bounds, falling back to random walk"
                );
                random_walk(graph, start, rng)
            }
        },
    };

    let path = assemble(&ids, &snapshot.lookup);
    debug!(start, length = path.nodes.len(), "generated story");
    Ok(path)
}

/// Expands one node: its content plus the choices reachable in one step.
///
/// Works on any graph, cyclic or not, since it only inspects the node's
/// own successors. Options keep adjacency order; successors without a
/// record are skipped.
///
/// # Errors
///
/// Returns `StoryError::NodeNotFound` if `node_id` has no record, and
/// `StoryError::Infrastructure` if the store cannot be read.
#[instrument(skip(store))]
pub async fn get_step(
    genre: Option<&str>,
    node_id: &str,
    store: &dyn EventStore,
) -> Result<StepView, StoryError> {
    let snapshot = build_snapshot(genre, store).await?;

    let Some(record) = snapshot.lookup.get(node_id) else {
        return Err(StoryError::NodeNotFound(node_id.to_owned()));
    };

    if !is_acyclic(snapshot.graph.adjacency()) {
        warn!("story graph is cyclic; answering the single step anyway");
    }

    let options: Vec<StepOption> = snapshot
        .graph
        .successors(node_id)
        .iter()
        .filter_map(|id| {
            let next = snapshot.lookup.get(id)?;
            Some(StepOption {
                event_id: id.clone(),
                preview: preview(&next.text),
                genre: next.genre.clone(),
            })
        })
        .collect();

    Ok(StepView {
        current: StoryNode::from_record(node_id, record),
        is_terminal: options.is_empty(),
        options,
    })
}

fn assemble(ids: &[String], lookup: &EventLookup) -> StoryPath {
    let nodes = ids
        .iter()
        .filter_map(|id| Some(StoryNode::from_record(id, lookup.get(id)?)))
        .collect();
    StoryPath { nodes }
}
