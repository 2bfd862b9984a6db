//! Network-subsystem error type.
//!
//! "No route" and "node not in graph" are ordinary outcomes and are reported
//! as `Ok(None)` by the routers.  Only internal defects are errors.

use thiserror::Error;

/// Errors produced by `fr-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The predecessor walk from the target never reached the source.  The
    /// search finalized the target, so this means the router's bookkeeping
    /// is inconsistent.
    #[error("predecessor chain from {to} did not reach {from} after {hops} hops")]
    BrokenPredecessorChain { from: String, to: String, hops: usize },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
