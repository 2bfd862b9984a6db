//! Tunable constants for graph building, risk overlay, and raster
//! vectorization.
//!
//! Every threshold the pipeline uses is a field here and is passed into the
//! functions that need it, so tests and applications can inject their own
//! values.  Typically loaded from a TOML/JSON file by the application crate
//! (enable the `serde` feature).

use crate::{CoreError, CoreResult, GeoPoint, NodeId};

// ── RoutingConfig ─────────────────────────────────────────────────────────────

/// Parameters shared by the graph builder and the risk overlay.
///
/// Both must use the same `precision`: the overlay recomputes node ids from
/// raw road vertices and only penalises edges whose ids match the builder's.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingConfig {
    /// Decimal digits kept when quantizing coordinates into node ids.
    /// Default: 6 (≈ 0.11 m).
    pub precision: u8,

    /// Cost added to every road segment that intersects a hazard polygon.
    /// Large enough that any dry detour wins, but additive so a route
    /// through a hazard still exists when it is the only one.
    /// Default: 1 000 000.
    pub risk_penalty: f64,
}

impl RoutingConfig {
    pub const DEFAULT_PRECISION: u8 = 6;
    pub const DEFAULT_RISK_PENALTY: f64 = 1_000_000.0;

    pub fn validate(&self) -> CoreResult<()> {
        if self.precision > NodeId::MAX_PRECISION {
            return Err(CoreError::Config(format!(
                "precision {} exceeds maximum {}",
                self.precision,
                NodeId::MAX_PRECISION
            )));
        }
        if !(self.risk_penalty.is_finite() && self.risk_penalty >= 0.0) {
            return Err(CoreError::Config(format!(
                "risk_penalty must be finite and non-negative, got {}",
                self.risk_penalty
            )));
        }
        Ok(())
    }

    /// Quantize a coordinate with this configuration's precision.
    #[inline]
    pub fn node_id(&self, point: GeoPoint) -> NodeId {
        NodeId::quantize(point, self.precision)
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            precision:    Self::DEFAULT_PRECISION,
            risk_penalty: Self::DEFAULT_RISK_PENALTY,
        }
    }
}

// ── VectorizeConfig ───────────────────────────────────────────────────────────

/// Thresholds for turning a classified hazard raster into polygons.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorizeConfig {
    /// Connected components (8-neighbour) with fewer pixels are treated as
    /// speckle noise and dropped.  Default: 3.
    pub min_component_pixels: usize,

    /// Dissolved polygons smaller than this many square metres are dropped.
    /// Default: 15 000 m² (1.5 ha).
    pub min_area_m2: f64,

    /// `risk_cost` attribute attached to every emitted polygon.
    /// Default: 500.
    pub risk_cost: f64,
}

impl VectorizeConfig {
    pub const DEFAULT_MIN_COMPONENT_PIXELS: usize = 3;
    pub const DEFAULT_MIN_AREA_M2: f64 = 15_000.0;
    pub const DEFAULT_RISK_COST: f64 = 500.0;

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.min_area_m2.is_finite() && self.min_area_m2 >= 0.0) {
            return Err(CoreError::Config(format!(
                "min_area_m2 must be finite and non-negative, got {}",
                self.min_area_m2
            )));
        }
        if !self.risk_cost.is_finite() {
            return Err(CoreError::Config(format!(
                "risk_cost must be finite, got {}",
                self.risk_cost
            )));
        }
        Ok(())
    }
}

impl Default for VectorizeConfig {
    fn default() -> Self {
        Self {
            min_component_pixels: Self::DEFAULT_MIN_COMPONENT_PIXELS,
            min_area_m2:          Self::DEFAULT_MIN_AREA_M2,
            risk_cost:            Self::DEFAULT_RISK_COST,
        }
    }
}
