//! Exchange graph - currencies as nodes, rates as weighted edges
//!
//! Every validated rate contributes two edges: the quoted direction with the
//! given rate and the opposite direction with its reciprocal. Node indices
//! are dense (`0..node_count`) and only meaningful within the request that
//! built the graph.

use crate::currency::{decode, CurrencyKey, Ticker};
use crate::rates::RateTable;
use hashbrown::HashMap;

/// Outgoing edge of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateEdge {
    /// Index of the node the edge leads to
    pub target: usize,
    /// Units of the target currency bought by one unit of the source
    pub rate: f64,
}

/// Immutable adjacency-list graph over the currencies of one request
#[derive(Debug, Clone)]
pub struct ExchangeGraph {
    /// Currency key -> dense node index
    index: HashMap<CurrencyKey, usize>,
    /// Dense node index -> currency key
    keys: Vec<CurrencyKey>,
    /// Outgoing edges per node, in insertion order
    adjacency: Vec<Vec<RateEdge>>,
}

impl ExchangeGraph {
    /// Build the graph from a validated rate table
    ///
    /// Indices are assigned in ascending key order. Edge order within a node
    /// follows the order of the rates in the table, which fixes the order
    /// the solver explores neighbours in.
    pub fn build(table: &RateTable) -> Self {
        let mut keys: Vec<CurrencyKey> = table.currencies().iter().copied().collect();
        keys.sort_unstable();

        let index: HashMap<CurrencyKey, usize> =
            keys.iter().enumerate().map(|(i, key)| (*key, i)).collect();

        let mut graph = Self {
            index,
            adjacency: vec![Vec::new(); keys.len()],
            keys,
        };

        for rate in table.rates() {
            // Every key in the table was inserted into the currency set
            let (Some(from), Some(to)) = (
                graph.node_index(rate.from.key()),
                graph.node_index(rate.to.key()),
            ) else {
                continue;
            };
            graph.add_edge_pair(from, to, rate.rate);
        }

        log::debug!(
            "Built exchange graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    fn add_edge_pair(&mut self, from: usize, to: usize, rate: f64) {
        self.adjacency[from].push(RateEdge { target: to, rate });
        self.adjacency[to].push(RateEdge {
            target: from,
            rate: 1.0 / rate,
        });
    }

    /// Dense index of a currency, if it takes part in any rate
    pub fn node_index(&self, key: CurrencyKey) -> Option<usize> {
        self.index.get(&key).copied()
    }

    /// Currency key stored at a node index
    pub fn key_of(&self, node: usize) -> Option<CurrencyKey> {
        self.keys.get(node).copied()
    }

    /// Ticker stored at a node index
    pub fn ticker_of(&self, node: usize) -> Option<Ticker> {
        self.key_of(node).map(decode)
    }

    /// Outgoing edges of a node (empty for an unknown index)
    pub fn edges(&self, node: usize) -> &[RateEdge] {
        self.adjacency.get(node).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}
