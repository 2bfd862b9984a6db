//! `fr-core`: foundational types for the `floodroute` evacuation router.
//!
//! This crate is a dependency of every other `fr-*` crate.  It has no
//! `fr-*` dependencies and minimal external ones (`geo` for great-circle
//! distance, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `NodeId`: quantized-coordinate graph key                |
//! | [`point`]    | `GeoPoint`, haversine distance, `"lat,lon"` parsing     |
//! | [`bbox`]     | `BBox` lon/lat rectangle                                |
//! | [`road`]     | `RoadFeature` vertex sequences and their segments      |
//! | [`config`]   | `RoutingConfig`, `VectorizeConfig`                      |
//! | [`error`]    | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public value types and   |
//! |         | configuration structs.                                     |

pub mod bbox;
pub mod config;
pub mod error;
pub mod ids;
pub mod point;
pub mod road;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bbox::BBox;
pub use config::{RoutingConfig, VectorizeConfig};
pub use error::{CoreError, CoreResult};
pub use ids::NodeId;
pub use point::GeoPoint;
pub use road::RoadFeature;
