//! Document sources.
//!
//! A `DocumentSource` supplies the ordered blocks of one legal document.
//! Sources hide where documents live (an OpenSearch index, a directory of
//! JSON exports, memory) from the extraction pipeline.

mod file;
mod memory;
mod opensearch;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use file::JsonFileSource;
pub use memory::InMemorySource;
pub use opensearch::{parse_get_response, OpenSearchSource};

use crate::config::{SourceConfig, SourceKind};
use crate::models::{Block, DOCUMENT_META_FIELDS};

/// Errors from document sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for document sources (OpenSearch, JSON files, memory).
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short identifier for logs.
    fn source_id(&self) -> &str;

    /// Fetch the blocks of a document, in document order.
    async fn fetch(&self, document_id: &str) -> Result<Vec<Block>, SourceError>;
}

/// Build the source selected by `config.kind`.
pub fn build_source(config: &SourceConfig) -> Result<Arc<dyn DocumentSource>, SourceError> {
    match config.kind {
        SourceKind::Opensearch => Ok(Arc::new(OpenSearchSource::from_config(config)?)),
        SourceKind::File => {
            let dir = config.data_dir.clone().ok_or_else(|| {
                SourceError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file source requires data_dir (or LEGALYTICS_DATA_DIR)",
                ))
            })?;
            Ok(Arc::new(JsonFileSource::new(dir)))
        }
    }
}

/// Flatten a stored document into its blocks.
///
/// The document carries its blocks in a `Blocks` array (or `data` for
/// offline exports). Each block loses its raw `chunks` field and receives a
/// copy of the document-level metadata; fields already present on the block
/// win. A document with no block array but a top-level `content` is treated
/// as a single block.
pub fn blocks_from_document(document: Value) -> Result<Vec<Block>, SourceError> {
    let mut document = match document {
        Value::Object(map) => map,
        other => {
            return Err(SourceError::Parse(format!(
                "expected a document object, got {}",
                json_kind(&other)
            )))
        }
    };

    let raw_blocks = match document.remove("Blocks").or_else(|| document.remove("data")) {
        Some(Value::Array(blocks)) => blocks,
        Some(other) => {
            return Err(SourceError::Parse(format!(
                "expected a block array, got {}",
                json_kind(&other)
            )))
        }
        None if document.contains_key("content") => {
            return Ok(vec![block_from_value(Value::Object(document), &Map::new())?]);
        }
        None => return Err(SourceError::Parse("document has no Blocks".to_string())),
    };

    let meta: Map<String, Value> = DOCUMENT_META_FIELDS
        .iter()
        .filter_map(|&field| document.get(field).map(|v| (field.to_string(), v.clone())))
        .collect();

    raw_blocks
        .into_iter()
        .map(|raw| block_from_value(raw, &meta))
        .collect()
}

fn block_from_value(raw: Value, meta: &Map<String, Value>) -> Result<Block, SourceError> {
    let mut object = match raw {
        Value::Object(map) => map,
        other => {
            return Err(SourceError::Parse(format!(
                "expected a block object, got {}",
                json_kind(&other)
            )))
        }
    };
    object.remove("chunks");
    for (key, value) in meta {
        object.entry(key.clone()).or_insert_with(|| value.clone());
    }
    serde_json::from_value(Value::Object(object)).map_err(|e| SourceError::Parse(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blocks_carry_document_meta() {
        let doc = json!({
            "Judul": "Peraturan Daerah tentang Ketertiban Umum",
            "Tahun": 2019,
            "Nomor": "5",
            "Irrelevant": "dropped",
            "Blocks": [
                {"content": "Pasal 1", "No": "1", "chunks": ["Pasal", "1"]},
                {"content": "Pasal 2", "Judul": "Judul blok"}
            ]
        });
        let blocks = blocks_from_document(doc).unwrap();
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].text(), "Pasal 1");
        assert_eq!(blocks[0].metadata["Tahun"], json!(2019));
        assert_eq!(blocks[0].metadata["No"], json!("1"));
        assert!(!blocks[0].metadata.contains_key("chunks"));
        assert!(!blocks[0].metadata.contains_key("Irrelevant"));

        // Block-level field wins over document meta.
        assert_eq!(blocks[1].metadata["Judul"], json!("Judul blok"));
    }

    #[test]
    fn test_null_content_is_absent() {
        let doc = json!({"Blocks": [{"content": null}, {"No": "2"}, {"content": ""}]});
        let blocks = blocks_from_document(doc).unwrap();
        assert!(!blocks[0].has_content());
        assert!(!blocks[1].has_content());
        assert!(blocks[2].has_content());
    }

    #[test]
    fn test_data_array_and_single_content() {
        let blocks = blocks_from_document(json!({"data": [{"content": "a"}]})).unwrap();
        assert_eq!(blocks[0].text(), "a");

        let blocks = blocks_from_document(json!({"content": "satu blok", "Slug": "x"})).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].metadata["Slug"], json!("x"));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            blocks_from_document(json!([1, 2])),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(
            blocks_from_document(json!({"Blocks": "nope"})),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(
            blocks_from_document(json!({"Blocks": [1]})),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(
            blocks_from_document(json!({"Judul": "x"})),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_build_file_source_requires_dir() {
        let mut config = SourceConfig::base_default();
        config.kind = SourceKind::File;
        assert!(build_source(&config).is_err());

        config.data_dir = Some("/tmp".into());
        assert_eq!(build_source(&config).unwrap().source_id(), "file");
    }
}
