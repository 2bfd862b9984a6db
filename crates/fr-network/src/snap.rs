//! Resolving arbitrary coordinates to graph nodes.
//!
//! [`nearest_node`] is the direct definition: decode every node key and
//! keep the one with the smallest great-circle distance.  O(V) per query.
//!
//! [`NodeLocator`] answers the same question in O(log V) after a one-off
//! bulk load.  Nodes are stored as unit vectors on the sphere; the chord
//! length between two unit vectors grows monotonically with their
//! great-circle distance, so the R-tree's Euclidean nearest neighbour is
//! exactly the haversine nearest node.

use fr_core::{GeoPoint, NodeId};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::Graph;

/// Nearest node of `graph` to `point` by great-circle distance, or `None`
/// if the graph has no nodes.  Ties resolve to an arbitrary candidate.
pub fn nearest_node(graph: &Graph, point: GeoPoint) -> Option<NodeId> {
    graph
        .nodes()
        .map(|id| (id, point.distance_m(id.to_point())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the locator: a node's position on the unit sphere.
#[derive(Clone, Debug)]
struct NodeEntry {
    xyz: [f64; 3],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.xyz)
    }
}

impl PointDistance for NodeEntry {
    /// Squared chord length between unit vectors.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.xyz[0] - point[0];
        let dy = self.xyz[1] - point[1];
        let dz = self.xyz[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

fn unit_vector(p: GeoPoint) -> [f64; 3] {
    let (lat, lon) = (p.lat.to_radians(), p.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

// ── NodeLocator ───────────────────────────────────────────────────────────────

/// Spatial index over the nodes of one graph, for repeated snapping.
///
/// Build it once per graph.  The risk overlay never adds or removes nodes,
/// so a locator built from the base graph also serves every overlay copy.
pub struct NodeLocator {
    tree: RTree<NodeEntry>,
}

impl NodeLocator {
    /// Bulk-load all nodes of `graph`.  O(V log V).
    pub fn build(graph: &Graph) -> Self {
        let entries: Vec<NodeEntry> = graph
            .nodes()
            .map(|id| NodeEntry { xyz: unit_vector(id.to_point()), id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Return the `NodeId` of the nearest node to `point`.
    ///
    /// Returns `None` only if the graph had no nodes.
    pub fn nearest(&self, point: GeoPoint) -> Option<NodeId> {
        self.tree.nearest_neighbor(&unit_vector(point)).map(|e| e.id)
    }

    /// Return up to `k` nearest nodes to `point`, sorted by ascending distance.
    pub fn k_nearest(&self, point: GeoPoint, k: usize) -> Vec<NodeId> {
        self.tree
            .nearest_neighbor_iter(&unit_vector(point))
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
