//! `fr-network`: road graph, shortest paths, and node snapping.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `Graph<K>` adjacency map, `GraphKey`                        |
//! | [`builder`] | `build_graph`: road features → base graph                   |
//! | [`heap`]    | `MinHeap<P, V>` binary min-heap (no decrease-key)           |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`, `LinearScanRouter` |
//! | [`snap`]    | `nearest_node` scan, `NodeLocator` (R-tree)                 |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Route`.                |

pub mod builder;
pub mod error;
pub mod graph;
pub mod heap;
pub mod router;
pub mod snap;


pub use builder::{build_graph, insert_road};
pub use error::{NetworkError, NetworkResult};
pub use graph::{Graph, GraphKey};
pub use heap::MinHeap;
pub use router::{DijkstraRouter, LinearScanRouter, Route, Router};
pub use snap::{NodeLocator, nearest_node};
