//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` only covers what
//! `tw-core` itself can reject.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
