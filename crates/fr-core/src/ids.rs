//! Quantized-coordinate node identity.
//!
//! A road-network node is identified by its coordinate rounded to a fixed
//! number of decimal digits.  Two road features whose endpoints agree to
//! that precision therefore share a node, which is what stitches separate
//! road geometries into one routable graph.
//!
//! The key is two fixed-point integers (`round(deg × 10^precision)`) plus
//! the precision itself, so it is `Copy + Eq + Hash + Ord` and never goes
//! through string formatting.  At the default precision of 6 digits one
//! unit is ≈ 0.11 m at the equator.

use std::fmt;

use crate::GeoPoint;

/// Graph vertex key: a coordinate quantized to `precision` decimal digits.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId {
    lon: i64,
    lat: i64,
    precision: u8,
}

impl NodeId {
    /// Largest supported precision.  Beyond 9 digits the f64 input no
    /// longer carries meaningful information for degree coordinates.
    pub const MAX_PRECISION: u8 = 9;

    /// Quantize `point` to `precision` decimal digits (clamped to
    /// [`MAX_PRECISION`](Self::MAX_PRECISION)).  Halves round away from zero.
    pub fn quantize(point: GeoPoint, precision: u8) -> Self {
        let precision = precision.min(Self::MAX_PRECISION);
        let scale = scale(precision);
        Self {
            lon: (point.lon * scale).round() as i64,
            lat: (point.lat * scale).round() as i64,
            precision,
        }
    }

    /// Decode back to the (quantized) coordinate.
    #[inline]
    pub fn to_point(self) -> GeoPoint {
        let scale = scale(self.precision);
        GeoPoint::new(self.lon as f64 / scale, self.lat as f64 / scale)
    }

    #[inline]
    pub fn precision(self) -> u8 {
        self.precision
    }

    /// Fixed-point longitude (`round(lon × 10^precision)`).
    #[inline]
    pub fn lon_fixed(self) -> i64 {
        self.lon
    }

    /// Fixed-point latitude (`round(lat × 10^precision)`).
    #[inline]
    pub fn lat_fixed(self) -> i64 {
        self.lat
    }
}

#[inline]
fn scale(precision: u8) -> f64 {
    10f64.powi(i32::from(precision))
}

/// Renders as `lon,lat` with exactly `precision` decimals, e.g.
/// `"19.944981,50.064650"`.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.to_point();
        let digits = usize::from(self.precision);
        write!(f, "{:.*},{:.*}", digits, p.lon, digits, p.lat)
    }
}
