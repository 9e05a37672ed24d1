//! End-to-end document processing.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::annotation::{build_annotator, Annotator};
use crate::config::Config;
use crate::error::PipelineError;
use crate::models::{AggregatedPayload, Block, FactRecord};
use crate::processor::RecordProcessor;
use crate::source::{build_source, DocumentSource};
use crate::stopwords::Stopwords;

/// Fetch → extract → aggregate for one document at a time.
///
/// A `Pipeline` holds only read-only state and can be shared across tasks.
pub struct Pipeline {
    config: Config,
    source: Arc<dyn DocumentSource>,
    processor: RecordProcessor,
    stopwords: Arc<Stopwords>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        source: Arc<dyn DocumentSource>,
        annotator: Option<Arc<dyn Annotator>>,
        stopwords: Arc<Stopwords>,
    ) -> Self {
        let processor = RecordProcessor::from_config(&config.annotation, annotator);
        Self {
            config,
            source,
            processor,
            stopwords,
        }
    }

    /// Build source, annotator and stopwords from configuration.
    pub fn from_config(config: Config) -> Result<Self, PipelineError> {
        let source = build_source(&config.source)?;
        let annotator = build_annotator(&config.annotation)?;
        let stopwords = match config.aggregation.stopwords_path {
            Some(ref path) => Stopwords::load(config.resolve_path(path))?,
            None => Stopwords::empty(),
        };
        Ok(Self::new(config, source, annotator, Arc::new(stopwords)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn annotator(&self) -> Option<&Arc<dyn Annotator>> {
        self.processor.annotator()
    }

    /// Same pipeline with annotation turned off; records keep `annotations = None`.
    pub fn without_annotator(mut self) -> Self {
        self.processor = RecordProcessor::from_config(&self.config.annotation, None);
        self
    }

    /// Fetch a document's blocks, dropping blocks without a content field.
    pub async fn fetch_blocks(&self, document_id: &str) -> Result<Vec<Block>, PipelineError> {
        let timeout = Duration::from_secs(self.config.source.timeout_secs);
        let blocks = tokio::time::timeout(timeout, self.source.fetch(document_id))
            .await
            .map_err(|_| {
                PipelineError::source_unavailable(
                    document_id,
                    format!("{} timed out after {:?}", self.source.source_id(), timeout),
                )
            })?
            .map_err(|e| PipelineError::source_unavailable(document_id, e))?;

        let total = blocks.len();
        let blocks: Vec<Block> = blocks.into_iter().filter(Block::has_content).collect();
        debug!(
            "Fetched {} blocks for {} ({} without content dropped)",
            blocks.len(),
            document_id,
            total - blocks.len()
        );
        Ok(blocks)
    }

    /// Per-block fact records, in block order.
    pub async fn extract_records(&self, document_id: &str) -> Result<Vec<FactRecord>, PipelineError> {
        let blocks = self.fetch_blocks(document_id).await?;
        Ok(self.processor.process_all(&blocks).await)
    }

    /// Produce the analytics payload for a document.
    pub async fn process_document(
        &self,
        document_id: &str,
    ) -> Result<AggregatedPayload, PipelineError> {
        let records = self.extract_records(document_id).await?;
        let payload = aggregate(&records, &self.stopwords, &self.config.aggregation);
        info!(
            "Processed {}: {} records, {} money, {} prohibitions, {} dates",
            document_id,
            records.len(),
            payload.tables.money.len(),
            payload.tables.prohibitions.len(),
            payload.tables.dates.len()
        );
        Ok(payload)
    }
}
