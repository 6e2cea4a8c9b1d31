//! Acyclicity check for story graphs.
//!
//! Random walks only terminate on acyclic graphs, so generation refuses to
//! run on a graph that fails [`is_acyclic`].

use std::collections::{HashMap, HashSet, VecDeque};

use super::graph::{Adjacency, StoryGraph};

/// Returns `true` if `adjacency` contains no directed cycle.
///
/// Kahn's counting procedure: every node that appears as a key or as a
/// successor gets an in-degree; nodes reachable by repeatedly removing
/// zero in-degree nodes are counted, and the graph is acyclic iff all of them
/// are. Runs in `O(nodes + edges)`.
#[must_use]
pub fn is_acyclic(adjacency: &Adjacency) -> bool {
    let mut in_degree: HashMap<&str, usize> = adjacency
        .keys()
        .map(|node| (node.as_str(), 0))
        .collect();

    for successors in adjacency.values() {
        for successor in successors {
            *in_degree.entry(successor.as_str()).or_insert(0) += 1;
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(&node, _)| node)
        .collect();
    let mut processed = 0usize;

    while let Some(current) = queue.pop_front() {
        processed += 1;
        let Some(successors) = adjacency.get(current) else {
            continue;
        };
        for successor in successors {
            if let Some(degree) = in_degree.get_mut(successor.as_str()) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(successor.as_str());
                }
            }
        }
    }

    processed == in_degree.len()
}

/// Nodes that no start node can reach, sorted by identifier.
///
/// Islands do not make a graph invalid; callers report them as warnings.
#[must_use]
pub fn unreachable_from_starts(graph: &StoryGraph) -> Vec<String> {
    let adjacency = graph.adjacency();
    let mut reached: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = graph.starts().iter().map(String::as_str).collect();

    while let Some(node) = stack.pop() {
        if !reached.insert(node) {
            continue;
        }
        stack.extend(graph.successors(node).iter().map(String::as_str));
    }

    let all_nodes: HashSet<&str> = adjacency
        .iter()
        .flat_map(|(node, successors)| {
            std::iter::once(node.as_str()).chain(successors.iter().map(String::as_str))
        })
        .collect();

    let mut islands: Vec<String> = all_nodes
        .difference(&reached)
        .map(|&node| node.to_owned())
        .collect();
    islands.sort_unstable();
    islands
}
