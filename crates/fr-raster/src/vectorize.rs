//! The full raster → hazard polygon pipeline.

use fr_core::{BBox, VectorizeConfig};
use fr_hazard::HazardPolygon;
use geo::ChamberlainDuquetteArea;
use tracing::{info, warn};

use crate::{GeoTransform, Raster, dissolve, filter_components, polygonize};

/// Denoise, polygonize, dissolve, and area-filter `raster`, which covers
/// `bbox` exactly.
///
/// Returns an empty list, with a warning, when `bbox` cannot georeference
/// the grid or when no hazard survives filtering.  Each returned polygon
/// carries `config.risk_cost` and its spherical area.
pub fn vectorize(raster: &Raster, bbox: &BBox, config: &VectorizeConfig) -> Vec<HazardPolygon> {
    let Some(transform) = GeoTransform::from_bbox(bbox, raster.width(), raster.height()) else {
        warn!(
            ?bbox,
            width = raster.width(),
            height = raster.height(),
            "cannot georeference hazard raster; no hazards produced"
        );
        return Vec::new();
    };

    let filtered = filter_components(raster, config.min_component_pixels);
    if filtered.hazard_count() == 0 {
        warn!(
            input_pixels = raster.hazard_count(),
            min_component_pixels = config.min_component_pixels,
            "no hazard pixels survived noise filtering"
        );
        return Vec::new();
    }

    let pixels = polygonize(&filtered, &transform);
    let dissolved = dissolve(&pixels, &transform);
    let regions = dissolved.len();

    let hazards: Vec<HazardPolygon> = dissolved
        .into_iter()
        .filter_map(|polygon| {
            let area = polygon.chamberlain_duquette_unsigned_area();
            (area >= config.min_area_m2).then(|| HazardPolygon::new(polygon, config.risk_cost).with_area(area))
        })
        .collect();

    if hazards.is_empty() {
        warn!(regions, min_area_m2 = config.min_area_m2, "every hazard region fell below the area threshold");
    } else {
        info!(
            pixels = pixels.len(),
            regions,
            kept = hazards.len(),
            "hazard raster vectorized"
        );
    }
    hazards
}
