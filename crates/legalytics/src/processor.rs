//! Per-block record processing.
//!
//! Runs the pattern extractors over a block's content and, when an annotator
//! is configured, annotates the content chunk by chunk.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::annotation::{AnnotationError, Annotator};
use crate::chunker::TextChunker;
use crate::config::AnnotationConfig;
use crate::extraction::{default_extractors, extract_all, FactExtractor};
use crate::models::{Annotation, Block, FactRecord};

/// Turns blocks into `FactRecord`s.
pub struct RecordProcessor {
    extractors: Vec<Box<dyn FactExtractor>>,
    annotator: Option<Arc<dyn Annotator>>,
    chunker: TextChunker,
    annotation_timeout: Duration,
}

impl RecordProcessor {
    /// Pattern extraction only.
    pub fn new() -> Self {
        Self {
            extractors: default_extractors(),
            annotator: None,
            chunker: TextChunker::default(),
            annotation_timeout: Duration::from_secs(60),
        }
    }

    /// Processor using the chunk size and timeout from `config`.
    pub fn from_config(config: &AnnotationConfig, annotator: Option<Arc<dyn Annotator>>) -> Self {
        Self {
            extractors: default_extractors(),
            annotator,
            chunker: TextChunker::new(config.chunk_size),
            annotation_timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_annotator(mut self, annotator: Arc<dyn Annotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    pub fn with_chunker(mut self, chunker: TextChunker) -> Self {
        self.chunker = chunker;
        self
    }

    pub fn with_annotation_timeout(mut self, timeout: Duration) -> Self {
        self.annotation_timeout = timeout;
        self
    }

    pub fn annotator(&self) -> Option<&Arc<dyn Annotator>> {
        self.annotator.as_ref()
    }

    /// Process one block.
    ///
    /// Blank content yields an empty record without invoking any extractor
    /// or the annotator. Annotation failures are logged and leave
    /// `annotations` as `None`; pattern matches are always kept.
    pub async fn process(&self, block: &Block) -> FactRecord {
        let content = block.text();
        if content.trim().is_empty() {
            return FactRecord {
                metadata: block.metadata.clone(),
                ..FactRecord::empty(content)
            };
        }

        let mut facts = extract_all(&self.extractors, content);
        let mut take = |name: &str| facts.remove(name).unwrap_or_default();
        let money = take("money");
        let dates = take("dates");
        let prohibitions = take("prohibitions");

        let annotations = match self.annotator {
            Some(ref annotator) => match self.annotate(annotator.as_ref(), content).await {
                Ok(annotations) => Some(annotations),
                Err(e) => {
                    warn!(
                        "{} failed, keeping pattern matches only: {}",
                        annotator.display_name(),
                        e
                    );
                    None
                }
            },
            None => None,
        };

        FactRecord {
            content: content.to_string(),
            money,
            dates,
            prohibitions,
            annotations,
            metadata: block.metadata.clone(),
        }
    }

    /// Process blocks sequentially, preserving their order.
    pub async fn process_all(&self, blocks: &[Block]) -> Vec<FactRecord> {
        let mut records = Vec::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            let record = self.process(block).await;
            debug!(
                "Block {}: {} money, {} dates, {} prohibitions",
                i,
                record.money.len(),
                record.dates.len(),
                record.prohibitions.len()
            );
            records.push(record);
        }
        records
    }

    /// Annotate every chunk in order; the first failure aborts the block.
    async fn annotate(
        &self,
        annotator: &dyn Annotator,
        content: &str,
    ) -> Result<Vec<Annotation>, AnnotationError> {
        let mut annotations = Vec::new();
        for chunk in self.chunker.chunk(content) {
            let result = tokio::time::timeout(self.annotation_timeout, annotator.annotate(chunk))
                .await
                .map_err(|_| AnnotationError::Timeout(self.annotation_timeout))??;
            annotations.extend(result);
        }
        Ok(annotations)
    }
}

impl Default for RecordProcessor {
    fn default() -> Self {
        Self::new()
    }
}
