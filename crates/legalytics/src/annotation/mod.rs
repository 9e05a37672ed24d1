//! Annotation capability: trait-based abstraction for chunk annotation backends.
//!
//! Each backend (entity tagging, LLM insight) implements the `Annotator`
//! trait. `build_annotator` picks one from the configured strategy.

mod annotator;
mod insight_annotator;
mod ner_annotator;
mod types;

use std::sync::Arc;
use std::time::Duration;

pub use annotator::Annotator;
pub use insight_annotator::InsightAnnotator;
pub use ner_annotator::{parse_ner_response, NerAnnotator};
pub use types::AnnotationError;

use crate::config::{AnnotationConfig, AnnotationStrategy};

/// Build the annotator selected by `config.strategy`.
///
/// Returns `Ok(None)` for the `none` strategy.
pub fn build_annotator(
    config: &AnnotationConfig,
) -> Result<Option<Arc<dyn Annotator>>, AnnotationError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match config.strategy {
        AnnotationStrategy::None => Ok(None),
        AnnotationStrategy::Ner => {
            let endpoint = config.ner_endpoint.clone().ok_or_else(|| {
                AnnotationError::BackendNotAvailable(
                    "ner strategy requires ner_endpoint (or NER_ENDPOINT)".to_string(),
                )
            })?;
            let annotator = NerAnnotator::new(endpoint, config.ner_api_key.clone(), timeout)?;
            Ok(Some(Arc::new(annotator)))
        }
        AnnotationStrategy::LlmInsight => {
            let annotator = InsightAnnotator::new(config.llm.clone(), timeout)?;
            Ok(Some(Arc::new(annotator)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(strategy: AnnotationStrategy) -> AnnotationConfig {
        AnnotationConfig {
            strategy,
            ..AnnotationConfig::base_default()
        }
    }

    #[test]
    fn test_build_none() {
        assert!(build_annotator(&config(AnnotationStrategy::None))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_build_ner_requires_endpoint() {
        let mut cfg = config(AnnotationStrategy::Ner);
        cfg.ner_endpoint = None;
        assert!(matches!(
            build_annotator(&cfg),
            Err(AnnotationError::BackendNotAvailable(_))
        ));

        cfg.ner_endpoint = Some("http://localhost:8080/ner".into());
        let annotator = build_annotator(&cfg).unwrap().unwrap();
        assert_eq!(annotator.annotation_type(), "ner");
    }

    #[test]
    fn test_build_llm_insight() {
        let annotator = build_annotator(&config(AnnotationStrategy::LlmInsight))
            .unwrap()
            .unwrap();
        assert_eq!(annotator.annotation_type(), "llm_insight");
        assert_eq!(annotator.display_name(), "LLM Insight");
    }
}
