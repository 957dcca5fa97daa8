//! Path solver - breadth-first search over the exchange graph
//!
//! The solver minimises the number of hops, not the compounded rate. When
//! several routes exist the one with the fewest conversions wins even if a
//! longer route would give a better price; ties between equally short routes
//! are broken by edge insertion order.

use crate::graph::ExchangeGraph;
use std::collections::VecDeque;

/// One traversed edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hop {
    pub from: usize,
    pub to: usize,
    pub rate: f64,
}

/// Fewest-hop path from source to destination, hops in travel order
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    hops: Vec<Hop>,
}

impl PathResult {
    /// Hops from source to destination
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Node indices visited, source first
    pub fn nodes(&self) -> Vec<usize> {
        let mut nodes = Vec::with_capacity(self.hops.len() + 1);
        if let Some(first) = self.hops.first() {
            nodes.push(first.from);
        }
        nodes.extend(self.hops.iter().map(|hop| hop.to));
        nodes
    }
}

/// BFS bookkeeping for one node
#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    distance: usize,
    /// Node we came from and the rate of the edge used
    predecessor: Option<(usize, f64)>,
}

/// Find a fewest-hop path, or `None` when the destination is unreachable
///
/// `source == destination` yields an empty path; callers are expected to
/// short-circuit that case before building a graph at all.
pub fn solve(graph: &ExchangeGraph, source: usize, destination: usize) -> Option<PathResult> {
    let n = graph.node_count();
    if source >= n || destination >= n {
        return None;
    }
    if source == destination {
        return Some(PathResult { hops: Vec::new() });
    }

    let mut state = vec![NodeState::default(); n];
    let mut queue = VecDeque::new();

    state[source].visited = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for edge in graph.edges(u) {
            let v = edge.target;
            if state[v].visited {
                continue;
            }

            state[v] = NodeState {
                visited: true,
                distance: state[u].distance + 1,
                predecessor: Some((u, edge.rate)),
            };

            // Stop as soon as the destination is discovered
            if v == destination {
                log::debug!(
                    "Destination node {} reached in {} hop(s)",
                    destination,
                    state[v].distance
                );
                return Some(trace_back(&state, destination));
            }

            queue.push_back(v);
        }
    }

    None
}

fn trace_back(state: &[NodeState], destination: usize) -> PathResult {
    let mut hops = Vec::with_capacity(state[destination].distance);
    let mut current = destination;

    while let Some((previous, rate)) = state[current].predecessor {
        hops.push(Hop {
            from: previous,
            to: current,
            rate,
        });
        current = previous;
    }

    hops.reverse();
    PathResult { hops }
}
