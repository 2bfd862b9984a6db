//! The route planner state handle.

use fr_core::{BBox, GeoPoint, NodeId, RoadFeature, RoutingConfig, VectorizeConfig};
use fr_hazard::{HazardIndex, HazardPolygon, OverlayStats, apply_risk_overlay};
use fr_network::{DijkstraRouter, Graph, NodeLocator, Router, build_graph};
use fr_raster::{Raster, vectorize};
use tracing::{debug, info, warn};

use crate::PlannerResult;

/// Weighted cost may exceed geometric length by this much (metres) before
/// a route counts as penalised.
const PENALTY_TOLERANCE_M: f64 = 1.0;

// ── PlannedRoute ──────────────────────────────────────────────────────────────

/// A route together with everything a client needs to draw and explain it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedRoute {
    /// Graph nodes from start to end, inclusive.
    pub path: Vec<NodeId>,
    /// Decoded positions of `path`.
    pub coords: Vec<GeoPoint>,
    /// Total weighted cost: metres plus any risk penalties.
    pub cost: f64,
    /// Geometric length of the path in metres.
    pub length_m: f64,
    /// Node the start coordinate snapped to.
    pub start: NodeId,
    /// Node the end coordinate snapped to.
    pub end: NodeId,
    /// `true` when the route crosses at least one hazard, i.e. no dry
    /// route existed.
    pub risk_penalty_applied: bool,
}

// ── HazardSource ──────────────────────────────────────────────────────────────

/// Which hazard set is active after a refresh.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HazardSource {
    /// Freshly vectorized from the supplied raster.
    Raster { polygons: usize },
    /// The raster produced nothing; the previous hazard set stays active.
    Cached { polygons: usize },
    /// The raster produced nothing and there was nothing to fall back to.
    Empty,
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Road graph + hazards + router, bundled for repeated route requests.
///
/// The base graph and node locator are built once in [`new`](Self::new)
/// and never change.  Each hazard update rebuilds the index and the
/// weighted graph wholesale; requests in between only snap and route.
pub struct RoutePlanner<R: Router = DijkstraRouter> {
    config:   RoutingConfig,
    roads:    Vec<RoadFeature>,
    base:     Graph,
    locator:  NodeLocator,
    hazards:  HazardIndex,
    weighted: Option<Graph>,
    router:   R,
}

impl RoutePlanner<DijkstraRouter> {
    /// Validate `config` and build the base graph from `roads`.
    pub fn new(roads: Vec<RoadFeature>, config: RoutingConfig) -> PlannerResult<Self> {
        config.validate()?;
        let base = build_graph(&roads, &config);
        if base.is_empty() {
            warn!(roads = roads.len(), "road dataset produced an empty graph; every request will find no route");
        }
        let locator = NodeLocator::build(&base);
        Ok(Self {
            config,
            roads,
            base,
            locator,
            hazards: HazardIndex::empty(),
            weighted: None,
            router: DijkstraRouter,
        })
    }
}

impl<R: Router> RoutePlanner<R> {
    /// Swap the shortest-path strategy, keeping all other state.
    pub fn with_router<R2: Router>(self, router: R2) -> RoutePlanner<R2> {
        RoutePlanner {
            config:   self.config,
            roads:    self.roads,
            base:     self.base,
            locator:  self.locator,
            hazards:  self.hazards,
            weighted: self.weighted,
            router,
        }
    }

    /// Replace the hazard set and recompute the weighted graph.
    pub fn set_hazards(&mut self, polygons: Vec<HazardPolygon>) -> OverlayStats {
        self.hazards = HazardIndex::build(polygons);
        if self.hazards.is_empty() {
            self.weighted = None;
            debug!("hazards cleared; routing on the base graph");
            return OverlayStats::default();
        }
        let overlay = apply_risk_overlay(&self.base, &self.roads, &self.hazards, &self.config);
        self.weighted = Some(overlay.graph);
        overlay.stats
    }

    /// Vectorize `raster` (covering `bbox`) and install the result.
    ///
    /// When vectorization yields nothing, for example because the raster is
    /// all dry or its georeferencing is unusable, the previous hazard set
    /// is kept and reported as [`HazardSource::Cached`].
    pub fn refresh_from_raster(
        &mut self,
        raster: &Raster,
        bbox: &BBox,
        config: &VectorizeConfig,
    ) -> PlannerResult<HazardSource> {
        config.validate()?;
        let polygons = vectorize(raster, bbox, config);

        if polygons.is_empty() {
            if self.hazards.is_empty() {
                warn!("hazard refresh produced no polygons and none are cached");
                return Ok(HazardSource::Empty);
            }
            warn!(cached = self.hazards.len(), "hazard refresh produced no polygons; keeping previous hazards");
            return Ok(HazardSource::Cached { polygons: self.hazards.len() });
        }

        let count = polygons.len();
        let stats = self.set_hazards(polygons);
        info!(
            polygons = count,
            penalized = stats.edges_penalized,
            "hazards refreshed from raster"
        );
        Ok(HazardSource::Raster { polygons: count })
    }

    /// As [`refresh_from_raster`](Self::refresh_from_raster), starting from
    /// raw row-major cell values.
    pub fn refresh_from_grid(
        &mut self,
        width: usize,
        height: usize,
        cells: Vec<f32>,
        bbox: &BBox,
        config: &VectorizeConfig,
    ) -> PlannerResult<HazardSource> {
        let raster = Raster::new(width, height, cells)?;
        self.refresh_from_raster(&raster, bbox, config)
    }

    /// Plan the cheapest route between two arbitrary coordinates.
    ///
    /// Both coordinates snap to their nearest graph node.  Returns
    /// `Ok(None)` when the graph is empty or the snapped nodes are not
    /// connected.
    pub fn plan(&self, start: GeoPoint, end: GeoPoint) -> PlannerResult<Option<PlannedRoute>> {
        let (Some(from), Some(to)) = (self.locator.nearest(start), self.locator.nearest(end)) else {
            warn!(%start, %end, "no road nodes to snap to");
            return Ok(None);
        };
        debug!(%start, %from, %end, %to, "endpoints snapped");

        let graph = self.weighted.as_ref().unwrap_or(&self.base);
        let Some(route) = self.router.shortest_path(graph, from, to)? else {
            info!(%from, %to, router = self.router.name(), "no route between snapped endpoints");
            return Ok(None);
        };

        let length_m = self.path_length(&route.path);
        let risk_penalty_applied = route.cost > length_m + PENALTY_TOLERANCE_M;
        if risk_penalty_applied {
            warn!(cost = route.cost, length_m, "only available route crosses a hazard");
        }

        Ok(Some(PlannedRoute {
            coords: route.path.iter().map(|id| id.to_point()).collect(),
            path: route.path,
            cost: route.cost,
            length_m,
            start: from,
            end: to,
            risk_penalty_applied,
        }))
    }

    /// [`plan`](Self::plan) for `"lat,lon"` query strings.
    pub fn plan_from_query(&self, start: &str, end: &str) -> PlannerResult<Option<PlannedRoute>> {
        self.plan(start.parse()?, end.parse()?)
    }

    /// Unpenalised length of `path`, read from the base graph's edge costs.
    fn path_length(&self, path: &[NodeId]) -> f64 {
        path.windows(2)
            .map(|w| {
                self.base
                    .edge_cost(w[0], w[1])
                    .unwrap_or_else(|| w[0].to_point().distance_m(w[1].to_point()))
            })
            .sum()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn roads(&self) -> &[RoadFeature] {
        &self.roads
    }

    pub fn base_graph(&self) -> &Graph {
        &self.base
    }

    /// The hazard-weighted graph, if any hazards are active.
    pub fn weighted_graph(&self) -> Option<&Graph> {
        self.weighted.as_ref()
    }

    pub fn hazards(&self) -> &HazardIndex {
        &self.hazards
    }

    /// Extent of the road dataset, for requesting a hazard raster that
    /// covers it.
    pub fn road_extent(&self) -> Option<BBox> {
        BBox::covering(&self.roads)
    }
}
