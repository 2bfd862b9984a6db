//! `fr-raster`: turn a classified hazard raster into hazard polygons.
//!
//! # Pipeline
//!
//! ```text
//! Raster ──filter_components──▶ Raster ──polygonize──▶ [PixelPolygon]
//!        ──dissolve──▶ [Polygon] ──area filter──▶ [HazardPolygon]
//! ```
//!
//! [`vectorize`] runs all four steps.  Each step is also public so callers
//! can inspect intermediate results.
//!
//! # Crate layout
//!
//! | Module         | Contents                                           |
//! |----------------|----------------------------------------------------|
//! | [`raster`]     | `Raster` grid, `GeoTransform` georeferencing       |
//! | [`denoise`]    | `filter_components` (8-connected speckle removal)  |
//! | [`polygonize`] | `polygonize`, `dissolve`, `PixelPolygon`           |
//! | [`vectorize`]  | `vectorize`: the full pipeline                     |
//! | [`error`]      | `RasterError`, `RasterResult<T>`                   |

pub mod denoise;
pub mod error;
pub mod polygonize;
pub mod raster;
pub mod vectorize;


pub use denoise::filter_components;
pub use error::{RasterError, RasterResult};
pub use polygonize::{PixelPolygon, dissolve, polygonize};
pub use raster::{GeoTransform, Raster};
pub use vectorize::vectorize;
