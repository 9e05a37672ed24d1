//! Named Entity Recognition annotator backed by a token-classification endpoint.
//!
//! The endpoint speaks the HuggingFace inference format: the request body is
//! `{"inputs": "<text>"}` and the response is a list of aggregated entity
//! spans.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::models::Annotation;

use super::annotator::Annotator;
use super::types::AnnotationError;

/// One span as returned by the inference endpoint.
#[derive(Debug, Deserialize)]
struct NerSpan {
    #[serde(default)]
    entity_group: Option<String>,
    #[serde(default)]
    entity: Option<String>,
    word: String,
    score: f32,
    #[serde(default)]
    start: Option<usize>,
    #[serde(default)]
    end: Option<usize>,
}

/// Annotator that tags entities in each chunk via HTTP.
pub struct NerAnnotator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl NerAnnotator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AnnotationError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AnnotationError::BackendNotAvailable(format!("Failed to create HTTP client: {}", e))
        })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Annotator for NerAnnotator {
    fn annotation_type(&self) -> &str {
        "ner"
    }

    fn display_name(&self) -> &str {
        "Named Entity Recognition"
    }

    async fn is_available(&self) -> bool {
        !self.endpoint.is_empty()
    }

    fn availability_hint(&self) -> String {
        if self.endpoint.is_empty() {
            "No NER endpoint configured (set NER_ENDPOINT)".to_string()
        } else {
            String::new()
        }
    }

    async fn annotate(&self, chunk: &str) -> Result<Vec<Annotation>, AnnotationError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": chunk }));
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AnnotationError::Timeout(self.timeout)
            } else {
                AnnotationError::BackendNotAvailable(e.to_string())
            }
        })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AnnotationError::Failed(e.to_string()))?;
        if !status.is_success() {
            return Err(AnnotationError::Failed(format!("HTTP {}: {}", status, body)));
        }

        let annotations = parse_ner_response(&body)?;
        debug!("NER: {} entities", annotations.len());
        Ok(annotations)
    }
}

/// Parse a token-classification response body into entity annotations.
///
/// Accepts both a flat list of spans and the batched `[[...]]` form.
/// An `{"error": ...}` object is reported as a failure.
pub fn parse_ner_response(body: &str) -> Result<Vec<Annotation>, AnnotationError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| AnnotationError::Malformed(e.to_string()))?;

    if let Some(err) = value.get("error") {
        let msg = err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string());
        return Err(AnnotationError::Failed(msg));
    }

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(AnnotationError::Malformed(format!(
                "expected a list of entities, got {}",
                other
            )))
        }
    };

    // Batched responses wrap each input's spans in its own list.
    let items: Vec<Value> = if items.iter().all(Value::is_array) {
        items
            .into_iter()
            .flat_map(|v| match v {
                Value::Array(inner) => inner,
                _ => Vec::new(),
            })
            .collect()
    } else {
        items
    };

    items
        .into_iter()
        .map(|item| {
            let span: NerSpan = serde_json::from_value(item)
                .map_err(|e| AnnotationError::Malformed(e.to_string()))?;
            let entity_group = span
                .entity_group
                .or(span.entity)
                .ok_or_else(|| AnnotationError::Malformed("span without entity label".into()))?;
            Ok(Annotation::Entity {
                word: span.word,
                entity_group,
                score: span.score,
                start: span.start,
                end: span.end,
            })
        })
        .collect()
}
