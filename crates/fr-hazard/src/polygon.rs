//! A single hazard area.

use fr_core::{BBox, GeoPoint};
use geo::{BoundingRect, Coord, Intersects, Line, LineString, Polygon};

/// A hazard area with the cost of driving through it.
///
/// Only the exterior ring matters for routing; interior rings are kept if
/// present but the vectorizer never produces them.
#[derive(Clone, Debug, PartialEq)]
pub struct HazardPolygon {
    /// Lon/lat geometry.
    pub geometry: Polygon<f64>,
    /// Severity attached by the producer.  Informational: the overlay
    /// applies `RoutingConfig::risk_penalty` regardless.
    pub risk_cost: f64,
    /// Spherical area in square metres, when the producer computed it.
    pub area_m2: Option<f64>,
}

impl HazardPolygon {
    pub fn new(geometry: Polygon<f64>, risk_cost: f64) -> Self {
        Self { geometry, risk_cost, area_m2: None }
    }

    /// Build from an exterior ring of `(lon, lat)` pairs.  The ring is
    /// closed automatically.
    pub fn from_ring(ring: &[(f64, f64)], risk_cost: f64) -> Self {
        Self::new(Polygon::new(LineString::from(ring.to_vec()), vec![]), risk_cost)
    }

    #[must_use]
    pub fn with_area(mut self, area_m2: f64) -> Self {
        self.area_m2 = Some(area_m2);
        self
    }

    /// `true` if the exterior ring has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.geometry.exterior().0.is_empty()
    }

    pub fn bbox(&self) -> Option<BBox> {
        let rect = self.geometry.bounding_rect()?;
        Some(BBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    /// Exact test: does the straight segment `a`–`b` touch the polygon
    /// (boundary included)?
    pub fn intersects_segment(&self, a: GeoPoint, b: GeoPoint) -> bool {
        Line::new(Coord::from(a), Coord::from(b)).intersects(&self.geometry)
    }
}
