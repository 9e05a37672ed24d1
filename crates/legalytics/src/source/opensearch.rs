//! OpenSearch document source.
//!
//! Documents are stored one per regulation in a single index; the blocks
//! live under `_source.Blocks`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use super::{blocks_from_document, DocumentSource, SourceError};
use crate::config::SourceConfig;
use crate::models::Block;

/// Fetches documents with `GET {base_url}/{index}/_doc/{id}`.
pub struct OpenSearchSource {
    client: Client,
    base_url: Url,
    index: String,
    username: Option<String>,
    password: Option<String>,
}

impl OpenSearchSource {
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SourceError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(&config.base_url()).map_err(|e| {
            SourceError::Connection(format!("Invalid endpoint {}: {}", config.base_url(), e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::Connection(format!(
                "Invalid endpoint {}",
                config.base_url()
            )));
        }

        Ok(Self {
            client,
            base_url,
            index: config.index.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// The document id always becomes a single escaped path segment.
    fn document_url(&self, document_id: &str) -> Result<Url, SourceError> {
        if matches!(document_id, "" | "." | "..") {
            return Err(SourceError::NotFound(document_id.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::Connection(format!("Invalid endpoint {}", self.base_url)))?
            .pop_if_empty()
            .push(&self.index)
            .push("_doc")
            .push(document_id);
        Ok(url)
    }
}

#[async_trait]
impl DocumentSource for OpenSearchSource {
    fn source_id(&self) -> &str {
        "opensearch"
    }

    async fn fetch(&self, document_id: &str) -> Result<Vec<Block>, SourceError> {
        let url = self.document_url(document_id)?;
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(ref user) = self.username {
            request = request.basic_auth(user, self.password.as_ref());
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SourceError::Connection(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Connection(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(document_id.to_string()));
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!("HTTP {}: {}", status, body)));
        }

        parse_get_response(document_id, &body)
    }
}

/// Parse the body of a `_doc` GET into blocks.
pub fn parse_get_response(document_id: &str, body: &str) -> Result<Vec<Block>, SourceError> {
    let mut hit: Value =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    if hit.get("found").and_then(Value::as_bool) == Some(false) {
        return Err(SourceError::NotFound(document_id.to_string()));
    }

    let document = hit
        .get_mut("_source")
        .map(Value::take)
        .ok_or_else(|| SourceError::Parse("response has no _source".to_string()))?;

    blocks_from_document(document)
}
