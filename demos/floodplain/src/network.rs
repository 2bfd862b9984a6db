//! Synthetic riverside street network and flood raster.
//!
//! An 11 × 11 street grid at ~0.004° spacing, loosely placed on Mobile,
//! Alabama, with a river running north–south through the middle of town.
//! Only the two outer east–west streets cross the river on bridges high
//! enough to stay dry.

use fr_core::{GeoPoint, RoadFeature};
use fr_raster::{Raster, RasterResult};

pub const GRID: usize = 11;
const WEST: f64 = -88.080;
const SOUTH: f64 = 30.660;
const SPACING: f64 = 0.004;

/// Raster cells per street-grid cell.
const CELLS_PER_BLOCK: usize = 8;

/// Position of street crossing `(col, row)`; row 0 is the southern edge.
pub fn crossing(col: usize, row: usize) -> GeoPoint {
    GeoPoint::new(WEST + col as f64 * SPACING, SOUTH + row as f64 * SPACING)
}

/// One road feature per east–west and per north–south street.
pub fn build_roads() -> Vec<RoadFeature> {
    let mut roads = Vec::with_capacity(2 * GRID);
    for i in 0..GRID {
        roads.push(RoadFeature::new((0..GRID).map(|j| crossing(j, i)).collect()));
        roads.push(RoadFeature::new((0..GRID).map(|j| crossing(i, j)).collect()));
    }
    roads
}

/// Flood depth over the road extent: a meandering channel that overtops
/// every crossing except the northern and southern edge streets, plus a
/// scatter of single-cell puddles the vectorizer should discard as noise.
pub fn build_flood_raster() -> RasterResult<Raster> {
    let size = (GRID - 1) * CELLS_PER_BLOCK;
    let centre = size as f64 / 2.0;

    Raster::from_fn(size, size, |col, row| {
        // Keep the outermost block rows dry so the edge bridges survive.
        if row < CELLS_PER_BLOCK / 2 || row >= size - CELLS_PER_BLOCK / 2 {
            return 0.0;
        }
        let meander = (row as f64 / 9.0).sin() * 3.0;
        let offset = (col as f64 - centre - meander).abs();
        if offset < 5.0 {
            return (1.5 - offset * 0.2) as f32;
        }
        // Isolated puddles on a fixed lattice.
        if col % 17 == 3 && row % 13 == 5 {
            return 0.2;
        }
        0.0
    })
}
