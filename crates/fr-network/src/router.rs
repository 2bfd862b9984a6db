//! Routing trait and the two shortest-path strategies.
//!
//! # Strategies
//!
//! | Router             | Minimum selection        | Complexity        | Role          |
//! |--------------------|--------------------------|-------------------|---------------|
//! | [`DijkstraRouter`] | [`MinHeap`] pop          | O((V + E) log V)  | production    |
//! | [`LinearScanRouter`] | scan all unvisited nodes | O(V²)           | test oracle   |
//!
//! Both implement [`Router`], so callers are written once and the oracle can
//! be swapped in wherever a cross-check is wanted.
//!
//! # Outcomes
//!
//! - `Ok(Some(route))`: a path exists.  `source == target` yields
//!   `[source]` at cost 0.
//! - `Ok(None)`: empty graph, source or target absent, or target
//!   unreachable.  These are normal results, not errors.
//! - `Err(NetworkError::BrokenPredecessorChain)`: the search finished but
//!   the predecessor chain is corrupt.  Always a defect.

use fr_core::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, error, trace, warn};

use crate::{Graph, GraphKey, MinHeap, NetworkError, NetworkResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route<K = NodeId> {
    /// Nodes from source to target, both inclusive.
    pub path: Vec<K>,
    /// Sum of edge costs along `path` (metres plus any risk penalties).
    pub cost: f64,
}

impl<K: Copy> Route<K> {
    /// A route that starts and ends at `node`.
    pub fn trivial(node: K) -> Self {
        Self { path: vec![node], cost: 0.0 }
    }

    pub fn source(&self) -> Option<K> {
        self.path.first().copied()
    }

    pub fn target(&self) -> Option<K> {
        self.path.last().copied()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.path.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path strategy.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; all search state is local to one
/// call, so a single router may serve concurrent requests.
pub trait Router: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Compute the cheapest path from `source` to `target`.
    fn shortest_path<K: GraphKey>(
        &self,
        graph: &Graph<K>,
        source: K,
        target: K,
    ) -> NetworkResult<Option<Route<K>>>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Single-source Dijkstra over a binary min-heap with lazy deletion.
///
/// Stops as soon as the target is finalized, which is exact because all
/// edge costs are non-negative.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn shortest_path<K: GraphKey>(
        &self,
        graph: &Graph<K>,
        source: K,
        target: K,
    ) -> NetworkResult<Option<Route<K>>> {
        if let Precheck::Done(outcome) = precheck(self.name(), graph, source, target) {
            return Ok(outcome);
        }

        // dist[v] = best known cost to v; nodes not present are at +inf.
        let mut dist: FxHashMap<K, f64> = FxHashMap::default();
        let mut prev: FxHashMap<K, K> = FxHashMap::default();
        let mut finalized: FxHashSet<K> = FxHashSet::default();
        let mut heap: MinHeap<f64, K> = MinHeap::with_capacity(graph.node_count());
        let mut stale = 0usize;

        dist.insert(source, 0.0);
        heap.push(0.0, source);

        while let Some((_, node)) = heap.pop_min() {
            // Superseded entry for an already-finalized node.
            if !finalized.insert(node) {
                stale += 1;
                continue;
            }
            if node == target {
                break;
            }

            let base = dist[&node];
            for (next, cost) in graph.neighbors(node) {
                if finalized.contains(&next) {
                    continue;
                }
                let candidate = base + cost;
                if candidate < dist.get(&next).copied().unwrap_or(f64::INFINITY) {
                    dist.insert(next, candidate);
                    prev.insert(next, node);
                    heap.push(candidate, next);
                }
            }
        }

        trace!(router = self.name(), finalized = finalized.len(), stale, "search finished");
        finish(self.name(), graph, &dist, &prev, source, target)
    }
}

// ── LinearScanRouter ──────────────────────────────────────────────────────────

/// Textbook O(V²) Dijkstra: each round scans every unvisited node for the
/// smallest tentative distance.
///
/// Kept as a correctness oracle for [`DijkstraRouter`]; too slow for
/// production graphs.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearScanRouter;

impl Router for LinearScanRouter {
    fn name(&self) -> &'static str {
        "linear-scan"
    }

    fn shortest_path<K: GraphKey>(
        &self,
        graph: &Graph<K>,
        source: K,
        target: K,
    ) -> NetworkResult<Option<Route<K>>> {
        if let Precheck::Done(outcome) = precheck(self.name(), graph, source, target) {
            return Ok(outcome);
        }

        let nodes: Vec<K> = graph.nodes().collect();
        let mut dist: FxHashMap<K, f64> = nodes.iter().map(|&n| (n, f64::INFINITY)).collect();
        let mut prev: FxHashMap<K, K> = FxHashMap::default();
        let mut visited: FxHashSet<K> = FxHashSet::default();

        dist.insert(source, 0.0);

        while visited.len() < nodes.len() {
            let mut closest: Option<(K, f64)> = None;
            for &n in &nodes {
                let d = dist[&n];
                if !visited.contains(&n) && d < closest.map_or(f64::INFINITY, |(_, best)| best) {
                    closest = Some((n, d));
                }
            }

            // Everything left is unreachable.
            let Some((node, base)) = closest else { break };
            visited.insert(node);
            if node == target {
                break;
            }

            for (next, cost) in graph.neighbors(node) {
                if visited.contains(&next) {
                    continue;
                }
                let candidate = base + cost;
                if candidate < dist[&next] {
                    dist.insert(next, candidate);
                    prev.insert(next, node);
                }
            }
        }

        finish(self.name(), graph, &dist, &prev, source, target)
    }
}

// ── Shared internals ──────────────────────────────────────────────────────────

enum Precheck<K> {
    Done(Option<Route<K>>),
    Search,
}

/// Outcomes decided before any search runs.
fn precheck<K: GraphKey>(router: &str, graph: &Graph<K>, source: K, target: K) -> Precheck<K> {
    if graph.is_empty() {
        warn!(router, "routing requested on an empty graph");
        return Precheck::Done(None);
    }
    if !graph.contains_node(source) || !graph.contains_node(target) {
        debug!(router, %source, %target, "source or target is not a graph node");
        return Precheck::Done(None);
    }
    if source == target {
        return Precheck::Done(Some(Route::trivial(source)));
    }
    Precheck::Search
}

/// Turn final search state into a route, or `None` if the target was never
/// reached.
fn finish<K: GraphKey>(
    router: &str,
    graph: &Graph<K>,
    dist: &FxHashMap<K, f64>,
    prev: &FxHashMap<K, K>,
    source: K,
    target: K,
) -> NetworkResult<Option<Route<K>>> {
    let cost = dist.get(&target).copied().unwrap_or(f64::INFINITY);
    if cost == f64::INFINITY {
        debug!(router, %source, %target, "target unreachable");
        return Ok(None);
    }

    let path = reconstruct(prev, source, target, graph.node_count())?;
    debug!(router, %source, %target, cost, hops = path.len() - 1, "route found");
    Ok(Some(Route { path, cost }))
}

/// Walk predecessors from `target` back to `source`.
///
/// A simple path visits each node at most once, so a walk longer than
/// `node_count` hops means the chain is cyclic.
pub(crate) fn reconstruct<K: GraphKey>(
    prev: &FxHashMap<K, K>,
    source: K,
    target: K,
    node_count: usize,
) -> NetworkResult<Vec<K>> {
    let mut path = vec![target];
    let mut current = target;

    while current != source {
        match prev.get(&current) {
            Some(&p) if path.len() <= node_count => {
                path.push(p);
                current = p;
            }
            _ => {
                let hops = path.len() - 1;
                error!(%source, %target, hops, "predecessor chain does not reach the source");
                return Err(NetworkError::BrokenPredecessorChain {
                    from: source.to_string(),
                    to:   target.to_string(),
                    hops,
                });
            }
        }
    }

    path.reverse();
    Ok(path)
}
