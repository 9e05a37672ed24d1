//! LLM insight annotator: wraps `LlmClient::generate_insight()` behind the `Annotator` trait.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::llm::{LlmClient, LlmConfig, LlmError};
use crate::models::Annotation;

use super::annotator::Annotator;
use super::types::AnnotationError;

/// Annotator that produces one short insight per chunk.
pub struct InsightAnnotator {
    llm_client: LlmClient,
}

impl InsightAnnotator {
    pub fn new(config: LlmConfig, timeout: Duration) -> Result<Self, AnnotationError> {
        let llm_client = LlmClient::new(config, timeout)
            .map_err(|e| AnnotationError::BackendNotAvailable(e.to_string()))?;
        Ok(Self { llm_client })
    }

    /// Get the underlying LLM config (for display in CLI).
    pub fn llm_config(&self) -> &LlmConfig {
        self.llm_client.config()
    }
}

#[async_trait]
impl Annotator for InsightAnnotator {
    fn annotation_type(&self) -> &str {
        "llm_insight"
    }

    fn display_name(&self) -> &str {
        "LLM Insight"
    }

    async fn is_available(&self) -> bool {
        self.llm_client.is_available().await
    }

    fn availability_hint(&self) -> String {
        self.llm_client.config().availability_hint()
    }

    async fn annotate(&self, chunk: &str) -> Result<Vec<Annotation>, AnnotationError> {
        let text = self
            .llm_client
            .generate_insight(chunk)
            .await
            .map_err(|e| match e {
                LlmError::Disabled | LlmError::Connection(_) => {
                    AnnotationError::BackendNotAvailable(e.to_string())
                }
                LlmError::Parse(msg) => AnnotationError::Malformed(msg),
                LlmError::Api(_) => AnnotationError::Failed(e.to_string()),
            })?;

        debug!("Insight: {} chars", text.len());
        Ok(vec![Annotation::Insight { text }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_llm_maps_to_backend_not_available() {
        let mut config = LlmConfig::base_default();
        config.enabled = false;
        let annotator = InsightAnnotator::new(config, Duration::from_secs(1)).unwrap();

        assert_eq!(annotator.annotation_type(), "llm_insight");
        assert!(!annotator.is_available().await);
        assert!(annotator.availability_hint().contains("LLM_ENABLED"));
        assert!(matches!(
            annotator.annotate("Pasal 1").await,
            Err(AnnotationError::BackendNotAvailable(_))
        ));
    }
}
