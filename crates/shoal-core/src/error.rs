//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so configuration failures surface unchanged at the
//! top of the stack.

use thiserror::Error;

/// Errors raised while loading or validating shared configuration.
///
/// Nothing in this crate fails mid-tick; every variant is an initialisation
/// problem.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `shoal-core`.
pub type CoreResult<T> = Result<T, CoreError>;
