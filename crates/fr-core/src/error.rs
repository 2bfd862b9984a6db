//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they surface configuration or parse failures.

use thiserror::Error;

/// Errors produced by `fr-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `fr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
