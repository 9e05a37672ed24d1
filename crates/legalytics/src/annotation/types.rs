//! Types shared across annotation backends.

use std::time::Duration;

use thiserror::Error;

/// Errors from annotation backends.
///
/// Every variant is recoverable at the record level: the record keeps its
/// pattern matches and loses only its annotations.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("Annotation failed: {0}")]
    Failed(String),

    #[error("Annotation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed annotation response: {0}")]
    Malformed(String),
}
