//! Defines a lon/lat bounding box.  Used to query the hazard index with a
//! road segment's extent, to georeference hazard rasters, and to describe
//! the extent of a road dataset when requesting hazard data for it.

use crate::{GeoPoint, RoadFeature};

/// An axis-aligned rectangle in lon/lat degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self { min_lon, min_lat, max_lon, max_lat }
    }

    /// The smallest box containing both points, in any order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            min_lon: a.lon.min(b.lon),
            min_lat: a.lat.min(b.lat),
            max_lon: a.lon.max(b.lon),
            max_lat: a.lat.max(b.lat),
        }
    }

    /// The extent of a whole road dataset, or `None` when it has no
    /// vertices.
    pub fn covering(roads: &[RoadFeature]) -> Option<Self> {
        let mut vertices = roads.iter().flat_map(|r| r.vertices.iter().copied());
        let first = vertices.next()?;
        Some(vertices.fold(Self::from_corners(first, first), |bbox, v| bbox.expand(v)))
    }

    /// Grow the box to include `point`.
    #[must_use]
    pub fn expand(self, point: GeoPoint) -> Self {
        Self {
            min_lon: self.min_lon.min(point.lon),
            min_lat: self.min_lat.min(point.lat),
            max_lon: self.max_lon.max(point.lon),
            max_lat: self.max_lat.max(point.lat),
        }
    }

    /// Longitude span in degrees.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// `true` when the box has no positive area (or is not finite), which
    /// makes it unusable for georeferencing a raster.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
            || !(self.width().is_finite() && self.height().is_finite())
    }

    /// Closed-interval overlap test; boxes sharing only an edge intersect.
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
            && self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
    }
}
