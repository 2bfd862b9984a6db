//! Bounding-box index over hazard polygons.

use fr_core::{BBox, GeoPoint};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};
use tracing::{debug, warn};

use crate::HazardPolygon;

/// R-tree entry: a polygon's bounding rectangle plus its slot in
/// `HazardIndex::polygons`.
type HazardEntry = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Immutable spatial index over a hazard dataset.
///
/// `query` answers "which polygons might touch this box" with bounding-box
/// candidates only; callers run the exact geometry test themselves (or use
/// [`segment_intersects`](Self::segment_intersects)).
///
/// Read-only after construction, so it can be shared across threads
/// without locking.
pub struct HazardIndex {
    tree: RTree<HazardEntry>,
    polygons: Vec<HazardPolygon>,
}

impl HazardIndex {
    /// Bulk-load all polygons.  Polygons with an empty exterior ring have no
    /// bounding box and are dropped with a warning.
    pub fn build(polygons: Vec<HazardPolygon>) -> Self {
        let submitted = polygons.len();
        let mut kept = Vec::with_capacity(submitted);
        let mut entries = Vec::with_capacity(submitted);

        for polygon in polygons {
            let Some(bbox) = polygon.bbox() else { continue };
            let rect = Rectangle::from_corners([bbox.min_lon, bbox.min_lat], [bbox.max_lon, bbox.max_lat]);
            entries.push(GeomWithData::new(rect, kept.len()));
            kept.push(polygon);
        }

        let skipped = submitted - kept.len();
        if skipped > 0 {
            warn!(skipped, "hazard polygons with an empty exterior ring were not indexed");
        }
        debug!(polygons = kept.len(), "hazard index built");

        Self { tree: RTree::bulk_load(entries), polygons: kept }
    }

    /// An index with no hazards.
    pub fn empty() -> Self {
        Self { tree: RTree::new(), polygons: Vec::new() }
    }

    /// Every polygon whose bounding box intersects `bbox` (closed
    /// intervals, so touching boxes count).
    pub fn query(&self, bbox: &BBox) -> Vec<&HazardPolygon> {
        let envelope = AABB::from_corners([bbox.min_lon, bbox.min_lat], [bbox.max_lon, bbox.max_lat]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| &self.polygons[entry.data])
            .collect()
    }

    /// `true` if the segment `a`–`b` intersects any indexed polygon.
    pub fn segment_intersects(&self, a: GeoPoint, b: GeoPoint) -> bool {
        self.query(&BBox::from_corners(a, b))
            .into_iter()
            .any(|polygon| polygon.intersects_segment(a, b))
    }

    /// The indexed polygons, in the order they were submitted.
    pub fn polygons(&self) -> &[HazardPolygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl Default for HazardIndex {
    fn default() -> Self {
        Self::empty()
    }
}
