//! Path generation strategies over a story graph.

use serde::{Deserialize, Serialize};
use storymap_core::error::StoryError;
use storymap_core::rng::{DeterministicRng, choose, shuffle};

use super::graph::StoryGraph;

/// Traversal policy used to turn a graph into one story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Uniform random walk from the start node to a leaf.
    Random,
    /// Randomized depth-first search for a path within [`SearchBounds`],
    /// falling back to a random walk when none exists.
    #[default]
    #[serde(alias = "smart")]
    LengthConstrained,
}

/// Closed range of acceptable path lengths, counted in nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBounds {
    min_len: usize,
    max_len: usize,
}

impl SearchBounds {
    /// Default lower bound.
    pub const DEFAULT_MIN_LEN: usize = 5;
    /// Default upper bound.
    pub const DEFAULT_MAX_LEN: usize = 8;
    /// Largest accepted upper bound; caps the search depth.
    pub const MAX_DEPTH: usize = 32;

    /// Creates bounds `[min_len, max_len]`.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Validation` if `min_len` is zero or exceeds
    /// `max_len`, or if `max_len` exceeds [`Self::MAX_DEPTH`].
    pub fn new(min_len: usize, max_len: usize) -> Result<Self, StoryError> {
        if min_len == 0 {
            return Err(StoryError::Validation(
                "minimum story length must be at least 1".into(),
            ));
        }
        if min_len > max_len {
            return Err(StoryError::Validation(format!(
                "minimum story length {min_len} exceeds maximum {max_len}"
            )));
        }
        if max_len > Self::MAX_DEPTH {
            return Err(StoryError::Validation(format!(
                "maximum story length {max_len} exceeds the limit of {}",
                Self::MAX_DEPTH
            )));
        }
        Ok(Self { min_len, max_len })
    }

    /// Lower bound.
    #[must_use]
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Upper bound; also the search depth ceiling.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            min_len: Self::DEFAULT_MIN_LEN,
            max_len: Self::DEFAULT_MAX_LEN,
        }
    }
}

/// Result of a length-constrained search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A start-to-leaf path whose length lies within the bounds.
    Found(Vec<String>),
    /// Every candidate path was explored without success.
    Exhausted,
}

/// Walks from `start`, choosing a successor uniformly at random at every
/// step, until a leaf is reached.
///
/// The graph must be acyclic; a cycle reachable from `start` would make the
/// walk unbounded.
pub fn random_walk(graph: &StoryGraph, start: &str, rng: &mut dyn DeterministicRng) -> Vec<String> {
    let mut path = vec![start.to_owned()];
    let mut current = start;
    while let Some(next) = choose(graph.successors(current), rng) {
        path.push(next.clone());
        current = next.as_str();
    }
    path
}

struct Frame<'g> {
    node: &'g str,
    pending: Vec<&'g str>,
}

/// Randomized depth-first search for a start-to-leaf path whose length lies
/// within `bounds`.
///
/// Successors are tried in shuffled order and the explicit stack never grows
/// past `bounds.max_len()`, so the search terminates even on cyclic input.
/// In the worst case every simple path up to `max_len` nodes is visited.
pub fn constrained_search(
    graph: &StoryGraph,
    start: &str,
    bounds: SearchBounds,
    rng: &mut dyn DeterministicRng,
) -> SearchOutcome {
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut candidate = Some(start);

    loop {
        if let Some(node) = candidate.take() {
            let depth = stack.len() + 1;
            let successors = graph.successors(node);
            if successors.is_empty() {
                if depth >= bounds.min_len {
                    let path = stack
                        .iter()
                        .map(|frame| frame.node)
                        .chain(std::iter::once(node))
                        .map(str::to_owned)
                        .collect();
                    return SearchOutcome::Found(path);
                }
            } else if depth < bounds.max_len {
                let mut pending: Vec<&str> = successors.iter().map(String::as_str).collect();
                shuffle(&mut pending, rng);
                stack.push(Frame { node, pending });
            }
        }

        let Some(frame) = stack.last_mut() else {
            return SearchOutcome::Exhausted;
        };
        match frame.pending.pop() {
            Some(next) => candidate = Some(next),
            None => {
                stack.pop();
            }
        }
    }
}
