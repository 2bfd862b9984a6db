//! `fr-planner`: the request-level entry point of floodroute.
//!
//! A [`RoutePlanner`] owns everything a routing request needs: the road
//! features, the base graph built from them, a node locator, the current
//! hazard index, and the hazard-weighted graph derived from it.  There is
//! no global state; applications hold one planner per road dataset.
//!
//! # Typical flow
//!
//! ```rust,ignore
//! let mut planner = RoutePlanner::new(roads, RoutingConfig::default())?;
//! planner.refresh_from_raster(&raster, &bbox, &VectorizeConfig::default())?;
//! if let Some(route) = planner.plan(start, end)? {
//!     println!("{} m, penalised: {}", route.length_m, route.risk_penalty_applied);
//! }
//! ```
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on `PlannedRoute`.  |
//! | `parallel` | Forwards to `fr-hazard/parallel`.                     |

pub mod error;
pub mod planner;

#[cfg(test)]
mod tests;

pub use error::{PlannerError, PlannerResult};
pub use planner::{HazardSource, PlannedRoute, RoutePlanner};
