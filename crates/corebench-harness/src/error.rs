//! Error types for the harness

use corebench_config::ConfigError;
use thiserror::Error;

/// Errors raised outside individual benchmark runs.
///
/// Failures inside a run are recorded in its
/// [`Outcome`](crate::Outcome) rather than returned.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;
