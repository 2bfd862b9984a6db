//! Weighted adjacency map.
//!
//! # Layout
//!
//! ```text
//! node ─▶ { neighbour ─▶ cost }
//! ```
//!
//! Costs are non-negative metres, optionally inflated by a risk penalty.
//! Every node that appears on either end of an edge is a key, even when it
//! has no outgoing edges of its own.
//!
//! Roads are undirected: [`Graph::add_road`] stores both directions with the
//! same cost.  Inserting a directed edge that already exists keeps the
//! smaller cost, which absorbs duplicated or overlapping road geometry.
//!
//! The key type is generic so routers can be exercised on hand-labelled
//! graphs; production graphs use the default [`NodeId`].

use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;

use fr_core::NodeId;
use rustc_hash::FxHashMap;

/// Anything usable as a graph vertex key.
pub trait GraphKey: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync {}

impl<T> GraphKey for T where T: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync {}

/// Adjacency-map road graph.
///
/// The base graph is built once per road dataset and treated as immutable
/// afterwards; the risk overlay works on a `clone()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph<K: GraphKey = NodeId> {
    adjacency: FxHashMap<K, FxHashMap<K, f64>>,
}

impl<K: GraphKey> Graph<K> {
    pub fn new() -> Self {
        Self { adjacency: FxHashMap::default() }
    }

    /// Pre-allocate for the expected number of nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Register `node` with no edges.  Returns `false` if it already existed.
    pub fn add_node(&mut self, node: K) -> bool {
        match self.adjacency.entry(node) {
            Entry::Occupied(_) => false,
            Entry::Vacant(v) => {
                v.insert(FxHashMap::default());
                true
            }
        }
    }

    /// Insert the **directed** edge `from → to`, keeping the minimum cost if
    /// it already exists.  `to` is registered as a node.
    ///
    /// Use [`add_road`](Self::add_road) for road segments; this exists for
    /// one-way data and hand-built graphs.
    pub fn add_directed_edge(&mut self, from: K, to: K, cost: f64) {
        debug_assert!(cost >= 0.0, "negative edge cost {cost} on {from} -> {to}");
        self.add_node(to);
        match self.adjacency.entry(from).or_default().entry(to) {
            Entry::Occupied(mut o) => {
                if cost < *o.get() {
                    o.insert(cost);
                }
            }
            Entry::Vacant(v) => {
                v.insert(cost);
            }
        }
    }

    /// Insert an undirected road segment: both directions, same cost,
    /// minimum kept on duplicates.
    pub fn add_road(&mut self, a: K, b: K, cost: f64) {
        self.add_directed_edge(a, b, cost);
        self.add_directed_edge(b, a, cost);
    }

    /// Add `penalty` to the existing directed edge `from → to`.
    ///
    /// Returns `false` and changes nothing when that exact edge does not
    /// exist; the overlay relies on this to ignore segments whose node ids
    /// do not line up with the graph.
    pub fn add_edge_penalty(&mut self, from: K, to: K, penalty: f64) -> bool {
        match self.adjacency.get_mut(&from).and_then(|n| n.get_mut(&to)) {
            Some(cost) => {
                *cost += penalty;
                true
            }
            None => false,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Cost of the directed edge `from → to`, if present.
    pub fn edge_cost(&self, from: K, to: K) -> Option<f64> {
        self.adjacency.get(&from)?.get(&to).copied()
    }

    /// Outgoing `(neighbour, cost)` pairs of `node`; empty if absent.
    pub fn neighbors(&self, node: K) -> impl Iterator<Item = (K, f64)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|n| n.iter().map(|(&k, &c)| (k, c)))
    }

    /// All node keys, in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = K> + '_ {
        self.adjacency.keys().copied()
    }

    /// All directed edges as `(from, to, cost)`, in unspecified order.
    pub fn edges(&self) -> impl Iterator<Item = (K, K, f64)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&from, n)| n.iter().map(move |(&to, &c)| (from, to, c)))
    }

    #[inline]
    pub fn contains_node(&self, node: K) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of **directed** edges (an undirected road counts twice).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn out_degree(&self, node: K) -> usize {
        self.adjacency.get(&node).map_or(0, |n| n.len())
    }
}

impl<K: GraphKey> Default for Graph<K> {
    fn default() -> Self {
        Self::new()
    }
}
