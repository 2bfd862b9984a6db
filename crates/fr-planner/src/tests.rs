//! End-to-end tests: roads → graph → hazards → overlay → snap → route.

#[cfg(test)]
mod helpers {
    use fr_core::RoadFeature;
    use fr_hazard::HazardPolygon;

    pub const ORIGIN_LON: f64 = 10.0;
    pub const ORIGIN_LAT: f64 = 50.0;
    pub const SPACING: f64 = 0.001;

    /// `n × n` street grid: one feature per row and per column, each with a
    /// vertex at every crossing.
    pub fn street_grid(n: usize) -> Vec<RoadFeature> {
        let at = |i: usize| i as f64 * SPACING;
        let mut roads = Vec::with_capacity(2 * n);
        for i in 0..n {
            let row: Vec<(f64, f64)> = (0..n).map(|j| (ORIGIN_LON + at(j), ORIGIN_LAT + at(i))).collect();
            let col: Vec<(f64, f64)> = (0..n).map(|j| (ORIGIN_LON + at(i), ORIGIN_LAT + at(j))).collect();
            roads.push(RoadFeature::from_lon_lat(&row));
            roads.push(RoadFeature::from_lon_lat(&col));
        }
        roads
    }

    /// Hazard covering the middle of a 5 × 5 grid's centre row, leaving the
    /// outer ring of streets dry.
    pub fn central_flood() -> HazardPolygon {
        HazardPolygon::from_ring(
            &[
                (ORIGIN_LON + 0.0005, ORIGIN_LAT + 0.0015),
                (ORIGIN_LON + 0.0035, ORIGIN_LAT + 0.0015),
                (ORIGIN_LON + 0.0035, ORIGIN_LAT + 0.0025),
                (ORIGIN_LON + 0.0005, ORIGIN_LAT + 0.0025),
            ],
            500.0,
        )
    }
}

#[cfg(test)]
mod planning {
    use approx::assert_relative_eq;
    use fr_core::{GeoPoint, RoadFeature, RoutingConfig};
    use fr_network::LinearScanRouter;

    use super::helpers::{ORIGIN_LAT, ORIGIN_LON, central_flood, street_grid};
    use crate::{PlannerError, RoutePlanner};

    fn west() -> GeoPoint {
        GeoPoint::new(ORIGIN_LON, ORIGIN_LAT + 0.002)
    }

    fn east() -> GeoPoint {
        GeoPoint::new(ORIGIN_LON + 0.004, ORIGIN_LAT + 0.002)
    }

    #[test]
    fn dry_network_routes_straight() {
        let planner = RoutePlanner::new(street_grid(5), RoutingConfig::default()).unwrap();
        let route = planner.plan(west(), east()).unwrap().unwrap();
        assert_eq!(route.path.len(), 5);
        assert_relative_eq!(route.cost, route.length_m, max_relative = 1e-9);
        assert!(!route.risk_penalty_applied);
        assert_eq!(route.coords.len(), route.path.len());
        assert_eq!(route.start, planner.config().node_id(west()));
        assert_eq!(route.end, planner.config().node_id(east()));
    }

    #[test]
    fn flood_forces_dry_detour() {
        let mut planner = RoutePlanner::new(street_grid(5), RoutingConfig::default()).unwrap();
        let straight = planner.plan(west(), east()).unwrap().unwrap();

        let stats = planner.set_hazards(vec![central_flood()]);
        assert!(stats.edges_penalized > 0);

        let route = planner.plan(west(), east()).unwrap().unwrap();
        assert!(!route.risk_penalty_applied);
        assert!(route.length_m > straight.length_m);
        assert_relative_eq!(route.cost, route.length_m, max_relative = 1e-9);
        // Interior nodes of the centre row are all inside the flood.
        let centre_lat = ORIGIN_LAT + 0.002;
        assert!(route.coords[1..route.coords.len() - 1].iter().all(|p| (p.lat - centre_lat).abs() > 1e-7));

        // The base graph is untouched by the overlay.
        let base_route = fr_network::Router::shortest_path(
            &fr_network::DijkstraRouter,
            planner.base_graph(),
            straight.start,
            straight.end,
        )
        .unwrap()
        .unwrap();
        assert_relative_eq!(base_route.cost, straight.cost);
    }

    #[test]
    fn only_wet_route_is_flagged() {
        let road = RoadFeature::from_lon_lat(&[
            (ORIGIN_LON, ORIGIN_LAT + 0.002),
            (ORIGIN_LON + 0.002, ORIGIN_LAT + 0.002),
            (ORIGIN_LON + 0.004, ORIGIN_LAT + 0.002),
        ]);
        let mut planner = RoutePlanner::new(vec![road], RoutingConfig::default()).unwrap();
        planner.set_hazards(vec![central_flood()]);

        let route = planner.plan(west(), east()).unwrap().unwrap();
        assert!(route.risk_penalty_applied);
        assert!(route.cost > route.length_m + planner.config().risk_penalty);
    }

    #[test]
    fn clearing_hazards_restores_base_routing() {
        let mut planner = RoutePlanner::new(street_grid(5), RoutingConfig::default()).unwrap();
        planner.set_hazards(vec![central_flood()]);
        assert!(planner.weighted_graph().is_some());

        planner.set_hazards(vec![]);
        assert!(planner.weighted_graph().is_none());
        assert_eq!(planner.plan(west(), east()).unwrap().unwrap().path.len(), 5);
    }

    #[test]
    fn off_network_points_snap() {
        let planner = RoutePlanner::new(street_grid(5), RoutingConfig::default()).unwrap();
        let near_west = GeoPoint::new(ORIGIN_LON - 0.0002, ORIGIN_LAT + 0.0021);
        let route = planner.plan(near_west, east()).unwrap().unwrap();
        assert_eq!(route.start, planner.config().node_id(west()));
    }

    #[test]
    fn same_point_is_trivial() {
        let planner = RoutePlanner::new(street_grid(3), RoutingConfig::default()).unwrap();
        let route = planner.plan(west(), west()).unwrap().unwrap();
        assert_eq!(route.path.len(), 1);
        assert_eq!(route.cost, 0.0);
        assert!(!route.risk_penalty_applied);
    }

    #[test]
    fn disconnected_roads_give_none() {
        let roads = vec![
            RoadFeature::from_lon_lat(&[(0.0, 0.0), (0.001, 0.0)]),
            RoadFeature::from_lon_lat(&[(1.0, 1.0), (1.001, 1.0)]),
        ];
        let planner = RoutePlanner::new(roads, RoutingConfig::default()).unwrap();
        assert!(planner.plan(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)).unwrap().is_none());
    }

    #[test]
    fn empty_roads_give_none() {
        let planner = RoutePlanner::new(vec![], RoutingConfig::default()).unwrap();
        assert!(planner.road_extent().is_none());
        assert!(planner.plan(west(), east()).unwrap().is_none());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = RoutingConfig { precision: 12, ..RoutingConfig::default() };
        let err = RoutePlanner::new(street_grid(2), config).err().unwrap();
        assert!(matches!(err, PlannerError::Core(_)));
    }

    #[test]
    fn query_strings_are_lat_first() {
        let planner = RoutePlanner::new(street_grid(5), RoutingConfig::default()).unwrap();
        let route = planner.plan_from_query("50.002,10.0", "50.002,10.004").unwrap().unwrap();
        assert_eq!(route.start, planner.config().node_id(west()));
        assert_eq!(route.end, planner.config().node_id(east()));

        let err = planner.plan_from_query("fifty,ten", "50.002,10.004").unwrap_err();
        assert!(matches!(err, PlannerError::Core(_)));
    }

    #[test]
    fn routers_agree() {
        let mut planner = RoutePlanner::new(street_grid(5), RoutingConfig::default()).unwrap();
        planner.set_hazards(vec![central_flood()]);
        let fast = planner.plan(west(), east()).unwrap().unwrap();

        let planner = planner.with_router(LinearScanRouter);
        let slow = planner.plan(west(), east()).unwrap().unwrap();
        assert_relative_eq!(fast.cost, slow.cost, max_relative = 1e-9);
    }
}

#[cfg(test)]
mod refresh {
    use fr_core::{BBox, GeoPoint, RoutingConfig, VectorizeConfig};
    use fr_raster::Raster;

    use super::helpers::{ORIGIN_LAT, ORIGIN_LON, central_flood, street_grid};
    use crate::{HazardSource, PlannerError, RoutePlanner};

    /// 40 × 40 raster over the 5 × 5 grid's extent, wet where
    /// `central_flood` is (columns 5..35, rows 15..25).
    fn flood_raster() -> Raster {
        Raster::from_fn(40, 40, |c, r| if (5..35).contains(&c) && (15..25).contains(&r) { 1.0 } else { 0.0 })
            .unwrap()
    }

    #[test]
    fn raster_hazards_reroute() {
        let mut planner = RoutePlanner::new(street_grid(5), RoutingConfig::default()).unwrap();
        let bbox = planner.road_extent().unwrap();
        assert_eq!(bbox, BBox::new(ORIGIN_LON, ORIGIN_LAT, ORIGIN_LON + 0.004, ORIGIN_LAT + 0.004));

        let source = planner.refresh_from_raster(&flood_raster(), &bbox, &VectorizeConfig::default()).unwrap();
        assert_eq!(source, HazardSource::Raster { polygons: 1 });

        let start = GeoPoint::new(ORIGIN_LON, ORIGIN_LAT + 0.002);
        let end = GeoPoint::new(ORIGIN_LON + 0.004, ORIGIN_LAT + 0.002);
        let route = planner.plan(start, end).unwrap().unwrap();
        assert!(!route.risk_penalty_applied);
        assert!(route.path.len() > 5);
    }

    #[test]
    fn empty_raster_falls_back_to_cache() {
        let mut planner = RoutePlanner::new(street_grid(5), RoutingConfig::default()).unwrap();
        let bbox = planner.road_extent().unwrap();
        let dry = Raster::zeros(40, 40).unwrap();

        let source = planner.refresh_from_raster(&dry, &bbox, &VectorizeConfig::default()).unwrap();
        assert_eq!(source, HazardSource::Empty);

        planner.set_hazards(vec![central_flood()]);
        let source = planner.refresh_from_raster(&dry, &bbox, &VectorizeConfig::default()).unwrap();
        assert_eq!(source, HazardSource::Cached { polygons: 1 });
        assert!(planner.weighted_graph().is_some());
    }

    #[test]
    fn malformed_grid_rejected() {
        let mut planner = RoutePlanner::new(street_grid(3), RoutingConfig::default()).unwrap();
        let bbox = planner.road_extent().unwrap();
        let err = planner
            .refresh_from_grid(4, 4, vec![0.0; 15], &bbox, &VectorizeConfig::default())
            .unwrap_err();
        assert!(matches!(err, PlannerError::Raster(_)));
    }

    #[test]
    fn invalid_vectorize_config_rejected() {
        let mut planner = RoutePlanner::new(street_grid(3), RoutingConfig::default()).unwrap();
        let bbox = planner.road_extent().unwrap();
        let config = VectorizeConfig { min_area_m2: f64::NAN, ..VectorizeConfig::default() };
        let err = planner.refresh_from_raster(&Raster::zeros(2, 2).unwrap(), &bbox, &config).unwrap_err();
        assert!(matches!(err, PlannerError::Core(_)));
    }
}
