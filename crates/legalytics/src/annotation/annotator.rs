//! Annotator trait: shared abstraction for annotation backends.

use async_trait::async_trait;

use crate::models::Annotation;

use super::types::AnnotationError;

/// A backend that can annotate a chunk of legal text.
///
/// Implementations wrap a specific analysis (entity tagging, LLM insight)
/// and expose it through a uniform interface so the `RecordProcessor`
/// can drive them identically.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Stable identifier of the annotation strategy.
    fn annotation_type(&self) -> &str;

    /// Human-readable name for CLI output.
    fn display_name(&self) -> &str;

    /// Whether the backend is ready to run.
    async fn is_available(&self) -> bool {
        true
    }

    /// Human-readable reason when `is_available` returns false.
    fn availability_hint(&self) -> String {
        String::new()
    }

    /// Annotate a single chunk of text.
    async fn annotate(&self, chunk: &str) -> Result<Vec<Annotation>, AnnotationError>;
}
