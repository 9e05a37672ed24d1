//! Pipeline-level errors.

use serde::Serialize;
use thiserror::Error;

use crate::annotation::AnnotationError;
use crate::source::SourceError;
use crate::stopwords::StopwordsError;

/// Fatal errors for a document request.
///
/// Per-record annotation failures are not represented here; they degrade the
/// record instead of failing the document.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Document source unavailable for {document_id}: {reason}")]
    SourceUnavailable { document_id: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn source_unavailable(document_id: &str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            document_id: document_id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Stable snake_case tag for the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "source_unavailable",
            Self::Config(_) => "config",
        }
    }

    /// Structured error object suitable for returning to a caller.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: ErrorBody {
                kind: self.kind().to_string(),
                message: self.to_string(),
            },
        }
    }
}

impl From<SourceError> for PipelineError {
    fn from(e: SourceError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<AnnotationError> for PipelineError {
    fn from(e: AnnotationError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<StopwordsError> for PipelineError {
    fn from(e: StopwordsError) -> Self {
        Self::Config(e.to_string())
    }
}

/// `{"error": {"kind": ..., "message": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_json() {
        let err = PipelineError::source_unavailable("uu-1", "Connection refused");
        assert_eq!(err.kind(), "source_unavailable");
        let json = serde_json::to_value(err.to_payload()).unwrap();
        assert_eq!(json["error"]["kind"], "source_unavailable");
        assert_eq!(
            json["error"]["message"],
            "Document source unavailable for uu-1: Connection refused"
        );
    }

    #[test]
    fn test_setup_errors_are_config() {
        let err: PipelineError = AnnotationError::BackendNotAvailable("no endpoint".into()).into();
        assert_eq!(err.kind(), "config");
    }
}
