//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `BmError` as one variant
//! via `#[from]`, so configuration failures surface unchanged at every layer.

use thiserror::Error;

use crate::BodyId;

/// The top-level error type for `bm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum BmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid body {id}: {reason}")]
    InvalidBody { id: BodyId, reason: &'static str },
}

/// Shorthand result type for all `bm-*` crates.
pub type BmResult<T> = Result<T, BmError>;
