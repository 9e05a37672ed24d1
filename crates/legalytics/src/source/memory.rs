//! In-memory document source.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{DocumentSource, SourceError};
use crate::models::Block;

/// Map of document id to blocks.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<String, Vec<Block>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, id: impl Into<String>, blocks: Vec<Block>) -> Self {
        self.insert(id, blocks);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, blocks: Vec<Block>) {
        self.documents.insert(id.into(), blocks);
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    fn source_id(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, document_id: &str) -> Result<Vec<Block>, SourceError> {
        self.documents
            .get(document_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(document_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch() {
        let source = InMemorySource::new().with_document("uu-1", vec![Block::new("Pasal 1")]);
        let blocks = source.fetch("uu-1").await.unwrap();
        assert_eq!(blocks, vec![Block::new("Pasal 1")]);
        assert!(matches!(
            source.fetch("uu-2").await,
            Err(SourceError::NotFound(id)) if id == "uu-2"
        ));
    }
}
