//! Road geometry as handed over by the data loader.

use crate::{BBox, GeoPoint};

/// One road line: an ordered sequence of vertices.  Consecutive vertex
/// pairs are the segments that become graph edges.
///
/// A feature with fewer than two vertices has no segments and contributes
/// nothing to the graph.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadFeature {
    pub vertices: Vec<GeoPoint>,
}

impl RoadFeature {
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    /// Convenience constructor from `(lon, lat)` pairs.
    pub fn from_lon_lat(coords: &[(f64, f64)]) -> Self {
        Self {
            vertices: coords.iter().map(|&(lon, lat)| GeoPoint::new(lon, lat)).collect(),
        }
    }

    /// Iterator over `(start, end)` vertex pairs.
    pub fn segments(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Extent of this road, or `None` if it has no vertices.
    pub fn bbox(&self) -> Option<BBox> {
        BBox::covering(std::slice::from_ref(self))
    }

    /// Sum of segment lengths in metres.
    pub fn length_m(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance_m(b)).sum()
    }
}
