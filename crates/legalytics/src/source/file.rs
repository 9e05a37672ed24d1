//! Source reading exported documents from a directory of JSON files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{blocks_from_document, DocumentSource, SourceError};
use crate::models::Block;

/// Reads `{dir}/{id}.json`.
///
/// The file holds either the stored document itself or a raw index hit with
/// the document under `_source`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, document_id: &str) -> Result<PathBuf, SourceError> {
        // Ids are file stems; anything path-like is rejected.
        if document_id.is_empty()
            || document_id.contains(['/', '\\'])
            || document_id.starts_with('.')
        {
            return Err(SourceError::NotFound(document_id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", document_id)))
    }
}

#[async_trait]
impl DocumentSource for JsonFileSource {
    fn source_id(&self) -> &str {
        "file"
    }

    async fn fetch(&self, document_id: &str) -> Result<Vec<Block>, SourceError> {
        let path = self.document_path(document_id)?;
        debug!("Reading document from {}", path.display());

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(document_id.to_string()))
            }
            Err(e) => return Err(SourceError::Io(e)),
        };

        let mut document: Value =
            serde_json::from_str(&contents).map_err(|e| SourceError::Parse(e.to_string()))?;
        if let Some(source) = document.get_mut("_source") {
            document = source.take();
        }
        blocks_from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_document_and_index_hit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("perda-5.json"),
            r#"{"Judul": "Perda 5", "Blocks": [{"content": "Pasal 1"}]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("hit.json"),
            r#"{"_id": "hit", "_source": {"Blocks": [{"content": "a"}, {"content": "b"}]}}"#,
        )
        .unwrap();

        let source = JsonFileSource::new(dir.path());
        let blocks = source.fetch("perda-5").await.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].metadata["Judul"], "Perda 5");

        let blocks = source.fetch("hit").await.unwrap();
        assert_eq!(blocks.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        let source = JsonFileSource::new(dir.path());

        assert!(matches!(
            source.fetch("absent").await,
            Err(SourceError::NotFound(_))
        ));
        assert!(matches!(
            source.fetch("../etc/passwd").await,
            Err(SourceError::NotFound(_))
        ));
        assert!(matches!(
            source.fetch("broken").await,
            Err(SourceError::Parse(_))
        ));
    }
}
