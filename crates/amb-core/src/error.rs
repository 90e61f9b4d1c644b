//! Core error type.
//!
//! Sub-crates define their own error enums; this one covers run
//! configuration that is not tied to any single subsystem.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `amb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
