//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::ConfigError;

/// Errors emitted while starting a drill.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DrillServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("expected {expected} questions, got {actual}")]
    QuestionCountMismatch { expected: usize, actual: usize },
}
