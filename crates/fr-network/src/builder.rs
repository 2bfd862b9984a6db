//! Road features → base graph.

use fr_core::{RoadFeature, RoutingConfig};
use tracing::{debug, info};

use crate::Graph;

/// Build the base routing graph from road line geometry.
///
/// For every consecutive vertex pair the two endpoints are quantized into
/// [`NodeId`](fr_core::NodeId)s with `config.precision` and joined by an
/// undirected edge whose cost is the segment's great-circle length in
/// metres.  Roads that share an endpoint (to within the precision) share a
/// node.
///
/// Duplicate consecutive vertices are not filtered: they produce a
/// zero-cost self-loop, which no shortest path ever uses.
///
/// Time complexity: O(S) expected, S = total segment count.
pub fn build_graph(roads: &[RoadFeature], config: &RoutingConfig) -> Graph {
    let segments: usize = roads.iter().map(RoadFeature::segment_count).sum();
    let mut graph = Graph::with_capacity(segments + 1);

    for road in roads {
        insert_road(&mut graph, road, config);
    }

    let skipped = roads.iter().filter(|r| r.segment_count() == 0).count();
    if skipped > 0 {
        debug!(skipped, "road features with fewer than two vertices contributed no edges");
    }
    info!(
        roads = roads.len(),
        segments,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "road graph built"
    );
    graph
}

/// Insert every segment of `road` into `graph`.  Returns the number of
/// segments processed.
pub fn insert_road(graph: &mut Graph, road: &RoadFeature, config: &RoutingConfig) -> usize {
    let mut count = 0;
    for (start, end) in road.segments() {
        let cost = start.distance_m(end);
        graph.add_road(config.node_id(start), config.node_id(end), cost);
        count += 1;
    }
    count
}
