//! `fr-hazard`: hazard polygons, their spatial index, and the risk overlay.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`polygon`] | `HazardPolygon`: exterior ring, risk cost, optional area  |
//! | [`index`]   | `HazardIndex`: bulk-loaded R-tree of polygon bboxes       |
//! | [`overlay`] | `apply_risk_overlay`, `RiskOverlay`, `OverlayStats`       |
//!
//! # Lifecycle
//!
//! A `HazardIndex` is built once per hazard dataset and replaced wholesale
//! when the data refreshes.  The overlay never mutates the base graph; each
//! call returns a fresh weighted copy.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Intersection tests run on rayon; penalties are still    |
//! |            | applied sequentially, so the output is identical.       |

pub mod index;
pub mod overlay;
pub mod polygon;

#[cfg(test)]
mod tests;

pub use index::HazardIndex;
pub use overlay::{OverlayStats, RiskOverlay, apply_risk_overlay};
pub use polygon::HazardPolygon;
