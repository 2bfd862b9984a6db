//! Risk overlay: base graph + hazards → penalised routing graph.
//!
//! # Algorithm
//!
//! ```text
//! graph ← clone(base)
//! for each segment (a, b) of every road:
//!     candidates ← index.query(bbox(a, b))
//!     if any candidate exactly intersects line(a, b):
//!         u, v ← node_id(a), node_id(b)
//!         add penalty to u→v and v→u, only where the edge exists
//! ```
//!
//! The penalty is additive: a route through water is still possible when
//! it is the only route, it is just never preferred over a dry one.
//! Each distinct directed edge is penalised at most once per call, so road
//! datasets that repeat a segment do not stack penalties.

use fr_core::{GeoPoint, NodeId, RoadFeature, RoutingConfig};
use fr_network::Graph;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::HazardIndex;

/// Counters describing one overlay pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayStats {
    /// Road segments checked against the index.
    pub segments_tested: usize,
    /// Segments that intersect at least one hazard.
    pub segments_risky: usize,
    /// Directed edges that received the penalty.
    pub edges_penalized: usize,
}

/// A hazard-weighted copy of the base graph.
#[derive(Clone, Debug)]
pub struct RiskOverlay {
    pub graph: Graph,
    pub stats: OverlayStats,
}

/// Produce a new graph whose edges crossing any hazard carry
/// `config.risk_penalty` on top of their length.
///
/// `roads` must be the features `base` was built from, and `config` must
/// use the same precision, otherwise the recomputed node ids miss their
/// edges and nothing is penalised.
///
/// `base` is never modified.  Calling this twice with the same inputs
/// gives equal graphs.
pub fn apply_risk_overlay(
    base: &Graph,
    roads: &[RoadFeature],
    index: &HazardIndex,
    config: &RoutingConfig,
) -> RiskOverlay {
    let mut graph = base.clone();
    let mut stats = OverlayStats::default();

    if index.is_empty() {
        debug!("no hazards indexed; overlay is a plain copy");
        return RiskOverlay { graph, stats };
    }

    let segments: Vec<(GeoPoint, GeoPoint)> = roads.iter().flat_map(|r| r.segments()).collect();
    stats.segments_tested = segments.len();

    let risky = risky_flags(&segments, index);
    let mut penalized: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();

    for (&(a, b), is_risky) in segments.iter().zip(risky) {
        if !is_risky {
            continue;
        }
        stats.segments_risky += 1;

        let (u, v) = (config.node_id(a), config.node_id(b));
        for (from, to) in [(u, v), (v, u)] {
            if penalized.insert((from, to)) && graph.add_edge_penalty(from, to, config.risk_penalty) {
                stats.edges_penalized += 1;
            }
        }
    }

    info!(
        hazards = index.len(),
        segments = stats.segments_tested,
        risky = stats.segments_risky,
        penalized = stats.edges_penalized,
        "risk overlay applied"
    );
    RiskOverlay { graph, stats }
}

#[cfg(not(feature = "parallel"))]
fn risky_flags(segments: &[(GeoPoint, GeoPoint)], index: &HazardIndex) -> Vec<bool> {
    segments.iter().map(|&(a, b)| index.segment_intersects(a, b)).collect()
}

#[cfg(feature = "parallel")]
fn risky_flags(segments: &[(GeoPoint, GeoPoint)], index: &HazardIndex) -> Vec<bool> {
    use rayon::prelude::*;

    segments.par_iter().map(|&(a, b)| index.segment_intersects(a, b)).collect()
}
