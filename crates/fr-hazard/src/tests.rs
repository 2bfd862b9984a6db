//! Unit tests for fr-hazard.

#[cfg(test)]
mod helpers {
    use fr_core::RoadFeature;

    use crate::HazardPolygon;

    /// Axis-aligned square hazard with lower-left corner `(lon, lat)`.
    pub fn square(lon: f64, lat: f64, size: f64) -> HazardPolygon {
        HazardPolygon::from_ring(
            &[(lon, lat), (lon + size, lat), (lon + size, lat + size), (lon, lat + size)],
            500.0,
        )
    }

    /// A straight east–west road at latitude 0.015 running through the
    /// standard hazard square, plus a dry detour around its north side.
    pub fn direct_and_detour() -> Vec<RoadFeature> {
        vec![
            RoadFeature::from_lon_lat(&[(0.0, 0.015), (0.015, 0.015), (0.03, 0.015)]),
            RoadFeature::from_lon_lat(&[(0.0, 0.015), (0.0, 0.03), (0.03, 0.03), (0.03, 0.015)]),
        ]
    }

    /// The standard hazard: 0.01° square spanning lon/lat 0.01–0.02.
    pub fn standard_hazard() -> HazardPolygon {
        square(0.01, 0.01, 0.01)
    }
}

// ── Hazard polygons ───────────────────────────────────────────────────────────

#[cfg(test)]
mod polygon {
    use fr_core::{BBox, GeoPoint};

    use super::helpers::standard_hazard;

    #[test]
    fn bbox_of_square() {
        assert_eq!(standard_hazard().bbox(), Some(BBox::new(0.01, 0.01, 0.02, 0.02)));
    }

    #[test]
    fn segment_crossing_without_vertex_inside() {
        let h = standard_hazard();
        assert!(h.intersects_segment(GeoPoint::new(0.0, 0.015), GeoPoint::new(0.03, 0.015)));
    }

    #[test]
    fn segment_with_overlapping_bbox_but_no_contact() {
        // x + y = 0.015 stays below the square's nearest corner (0.01, 0.01).
        let h = standard_hazard();
        assert!(!h.intersects_segment(GeoPoint::new(0.0, 0.015), GeoPoint::new(0.015, 0.0)));
    }

    #[test]
    fn segment_inside_and_touching() {
        let h = standard_hazard();
        assert!(h.intersects_segment(GeoPoint::new(0.012, 0.012), GeoPoint::new(0.018, 0.018)));
        assert!(h.intersects_segment(GeoPoint::new(0.0, 0.02), GeoPoint::new(0.01, 0.02)));
    }
}

// ── Spatial index ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use fr_core::{BBox, GeoPoint};
    use geo::{LineString, Polygon};

    use super::helpers::square;
    use crate::{HazardIndex, HazardPolygon};

    fn three_squares() -> HazardIndex {
        HazardIndex::build(vec![
            square(0.0, 0.0, 1.0),
            square(2.0, 0.0, 1.0),
            square(0.0, 2.0, 1.0),
        ])
    }

    #[test]
    fn query_returns_candidates_by_bbox() {
        let idx = three_squares();
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.query(&BBox::new(0.5, 0.5, 0.6, 0.6)).len(), 1);
        assert_eq!(idx.query(&BBox::new(-1.0, -1.0, 4.0, 4.0)).len(), 3);
        assert!(idx.query(&BBox::new(10.0, 10.0, 11.0, 11.0)).is_empty());
    }

    #[test]
    fn touching_boxes_are_candidates() {
        let idx = three_squares();
        let hits = idx.query(&BBox::new(1.0, 0.0, 2.0, 0.5));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn empty_polygons_are_skipped() {
        let empty = HazardPolygon::new(Polygon::new(LineString::new(vec![]), vec![]), 500.0);
        assert!(empty.is_empty());
        let idx = HazardIndex::build(vec![empty, square(0.0, 0.0, 1.0)]);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.polygons()[0].bbox(), Some(BBox::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn empty_index() {
        let idx = HazardIndex::build(vec![]);
        assert!(idx.is_empty());
        assert!(idx.query(&BBox::new(-180.0, -90.0, 180.0, 90.0)).is_empty());
        assert!(!idx.segment_intersects(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)));
    }

    #[test]
    fn index_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HazardIndex>();
    }
}

// ── Risk overlay ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod overlay {
    use approx::assert_relative_eq;
    use fr_core::{GeoPoint, RoadFeature, RoutingConfig};
    use fr_network::{DijkstraRouter, Router, build_graph};

    use super::helpers::{direct_and_detour, square, standard_hazard};
    use crate::{HazardIndex, apply_risk_overlay};

    #[test]
    fn crossing_edges_gain_exact_penalty_both_ways() {
        let config = RoutingConfig::default();
        let roads = direct_and_detour();
        let base = build_graph(&roads, &config);
        let index = HazardIndex::build(vec![standard_hazard()]);

        let overlay = apply_risk_overlay(&base, &roads, &index, &config);

        let west = config.node_id(GeoPoint::new(0.0, 0.015));
        let mid = config.node_id(GeoPoint::new(0.015, 0.015));
        for (u, v) in [(west, mid), (mid, west)] {
            let before = base.edge_cost(u, v).unwrap();
            let after = overlay.graph.edge_cost(u, v).unwrap();
            assert_relative_eq!(after, before + config.risk_penalty);
        }
        assert_eq!(overlay.stats.segments_tested, 5);
        assert_eq!(overlay.stats.segments_risky, 2);
        assert_eq!(overlay.stats.edges_penalized, 4);
    }

    #[test]
    fn dry_edges_unchanged_and_nothing_decreases() {
        let config = RoutingConfig::default();
        let roads = direct_and_detour();
        let base = build_graph(&roads, &config);
        let index = HazardIndex::build(vec![standard_hazard()]);
        let overlay = apply_risk_overlay(&base, &roads, &index, &config);

        assert_eq!(overlay.graph.node_count(), base.node_count());
        assert_eq!(overlay.graph.edge_count(), base.edge_count());
        for (u, v, before) in base.edges() {
            let after = overlay.graph.edge_cost(u, v).unwrap();
            assert!(after >= before);
            // Detour edges all sit at lon 0 / 0.03 or lat 0.03, clear of the square.
            if u.to_point().lat == 0.03 || v.to_point().lat == 0.03 {
                assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn base_graph_is_not_mutated() {
        let config = RoutingConfig::default();
        let roads = direct_and_detour();
        let base = build_graph(&roads, &config);
        let snapshot = base.clone();
        let index = HazardIndex::build(vec![standard_hazard()]);

        let _ = apply_risk_overlay(&base, &roads, &index, &config);
        assert_eq!(base, snapshot);
    }

    #[test]
    fn overlay_is_idempotent() {
        let config = RoutingConfig::default();
        let roads = direct_and_detour();
        let base = build_graph(&roads, &config);
        let index = HazardIndex::build(vec![standard_hazard(), square(0.012, 0.012, 0.005)]);

        let first = apply_risk_overlay(&base, &roads, &index, &config);
        let second = apply_risk_overlay(&base, &roads, &index, &config);
        assert_eq!(first.graph, second.graph);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn repeated_segment_is_penalised_once() {
        let config = RoutingConfig::default();
        let road = RoadFeature::from_lon_lat(&[(0.0, 0.015), (0.03, 0.015)]);
        let roads = vec![road.clone(), road];
        let base = build_graph(&roads, &config);
        let index = HazardIndex::build(vec![standard_hazard()]);

        let overlay = apply_risk_overlay(&base, &roads, &index, &config);
        assert_eq!(overlay.stats.segments_risky, 2);
        assert_eq!(overlay.stats.edges_penalized, 2);

        let a = config.node_id(GeoPoint::new(0.0, 0.015));
        let b = config.node_id(GeoPoint::new(0.03, 0.015));
        assert_relative_eq!(
            overlay.graph.edge_cost(a, b).unwrap(),
            base.edge_cost(a, b).unwrap() + config.risk_penalty
        );

        // Both vertices quantize to one node: the two directions collapse
        // into a single self-loop, so one risky segment penalises one edge.
        let short = vec![RoadFeature::from_lon_lat(&[(0.015, 0.015), (0.0150001, 0.015)])];
        let base = build_graph(&short, &config);
        let c = config.node_id(GeoPoint::new(0.015, 0.015));
        assert_eq!(base.node_count(), 1);

        let overlay = apply_risk_overlay(&base, &short, &index, &config);
        assert_eq!(overlay.stats.segments_risky, 1);
        assert_eq!(overlay.stats.edges_penalized, 1);
        assert_relative_eq!(
            overlay.graph.edge_cost(c, c).unwrap(),
            base.edge_cost(c, c).unwrap() + config.risk_penalty
        );
    }

    #[test]
    fn penalty_never_creates_edges() {
        let config = RoutingConfig::default();
        let roads = direct_and_detour();
        // Base graph only knows the detour.
        let base = build_graph(&roads[1..], &config);
        let index = HazardIndex::build(vec![standard_hazard()]);

        let overlay = apply_risk_overlay(&base, &roads, &index, &config);
        assert_eq!(overlay.stats.segments_risky, 2);
        assert_eq!(overlay.stats.edges_penalized, 0);
        assert_eq!(overlay.graph, base);
    }

    #[test]
    fn no_hazards_is_a_plain_copy() {
        let config = RoutingConfig::default();
        let roads = direct_and_detour();
        let base = build_graph(&roads, &config);
        let overlay = apply_risk_overlay(&base, &roads, &HazardIndex::empty(), &config);
        assert_eq!(overlay.graph, base);
        assert_eq!(overlay.stats.edges_penalized, 0);
    }

    #[test]
    fn route_prefers_dry_detour() {
        let config = RoutingConfig::default();
        let roads = direct_and_detour();
        let base = build_graph(&roads, &config);
        let index = HazardIndex::build(vec![standard_hazard()]);
        let overlay = apply_risk_overlay(&base, &roads, &index, &config);

        let start = config.node_id(GeoPoint::new(0.0, 0.015));
        let end = config.node_id(GeoPoint::new(0.03, 0.015));

        let dry = DijkstraRouter.shortest_path(&base, start, end).unwrap().unwrap();
        assert_eq!(dry.hop_count(), 2);

        let wet = DijkstraRouter.shortest_path(&overlay.graph, start, end).unwrap().unwrap();
        assert_eq!(wet.hop_count(), 3);
        assert!(wet.cost < config.risk_penalty);
    }

    #[test]
    fn only_route_through_hazard_still_exists() {
        let config = RoutingConfig::default();
        let roads = vec![direct_and_detour().remove(0)];
        let base = build_graph(&roads, &config);
        let index = HazardIndex::build(vec![standard_hazard()]);
        let overlay = apply_risk_overlay(&base, &roads, &index, &config);

        let start = config.node_id(GeoPoint::new(0.0, 0.015));
        let end = config.node_id(GeoPoint::new(0.03, 0.015));
        let route = DijkstraRouter.shortest_path(&overlay.graph, start, end).unwrap().unwrap();
        assert!(route.cost > 2.0 * config.risk_penalty);
    }
}
