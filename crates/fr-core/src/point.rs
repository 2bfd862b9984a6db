//! Geographic coordinate type and distance helpers.
//!
//! `GeoPoint` stores WGS-84 longitude/latitude in degrees as `f64`, in the
//! GeoJSON axis order (`lon` is x, `lat` is y).  Distances are great-circle
//! (haversine) metres; no projection is applied anywhere in the workspace.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, Distance, Haversine, Point};

use crate::CoreError;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Construct from longitude then latitude (x, y).
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        Haversine::distance(Point::from(self), Point::from(other))
    }

    /// `true` when both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<GeoPoint> for Point<f64> {
    #[inline]
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<GeoPoint> for Coord<f64> {
    #[inline]
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lon, y: p.lat }
    }
}

impl From<Coord<f64>> for GeoPoint {
    #[inline]
    fn from(c: Coord<f64>) -> Self {
        GeoPoint::new(c.x, c.y)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// Parses the `"lat,lon"` query form (latitude first, as typed by users and
/// accepted by the routing API), returning a point in lon/lat order.
impl FromStr for GeoPoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoreError::Parse(format!("expected \"lat,lon\", got {s:?}")));
        };

        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| CoreError::Parse(format!("invalid coordinate {v:?}: {e}")))
        };
        let point = GeoPoint::new(parse(lon)?, parse(lat)?);

        if !point.is_finite() {
            return Err(CoreError::Parse(format!("non-finite coordinate in {s:?}")));
        }
        Ok(point)
    }
}
