//! Domain error types.

use thiserror::Error;

/// Top-level error type for story graph operations.
///
/// Every variant is recoverable and is reported to the caller as a
/// structured result rather than a process-level fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoryError {
    /// No events exist for the requested genre.
    #[error("no events found for genre {}", genre_label(.0.as_deref()))]
    EmptyGraph(Option<String>),

    /// The graph has events but none is marked as a start node.
    #[error("no start node found for genre {}", genre_label(.0.as_deref()))]
    NoStartNodes(Option<String>),

    /// The effective start identifier is not a node of the graph.
    #[error("invalid start node: {0}")]
    InvalidStartNode(String),

    /// The story graph contains a directed cycle.
    #[error("cycle detected in story graph for genre {}", genre_label(.0.as_deref()))]
    CycleDetected(Option<String>),

    /// A node requested for single-step expansion has no record.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Invalid caller-supplied parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// The event store could not be read.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl StoryError {
    /// Machine-readable error kind, stable across releases.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyGraph(_) => "empty_graph",
            Self::NoStartNodes(_) => "no_start_nodes",
            Self::InvalidStartNode(_) => "invalid_start_node",
            Self::CycleDetected(_) => "cycle_detected",
            Self::NodeNotFound(_) => "node_not_found",
            Self::Validation(_) => "validation_error",
            Self::Infrastructure(_) => "infrastructure_error",
        }
    }
}

fn genre_label(genre: Option<&str>) -> String {
    match genre {
        Some(genre) => format!("'{genre}'"),
        None => "<any>".to_owned(),
    }
}
