//! Error types for corebench

use thiserror::Error;

/// Main error type for benchmark execution and verification.
///
/// A wrong result is never an error: `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchError {
    /// Benchmark parameters without a known-correct result
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Structural invariant violated while running (empty pile, oversized disk, ...)
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Recursion went deeper than the configured frame budget
    #[error("Recursion limit of {limit} frames exceeded")]
    RecursionLimit { limit: usize },
}

/// Result type alias for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;
