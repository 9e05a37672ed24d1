//! legalytics - fact extraction and analytics for Indonesian legal documents.
//!
//! Pulls a regulation's blocks from a document source, extracts money
//! amounts, dates and prohibition clauses from each block, optionally
//! annotates them, and aggregates the result into a word cloud plus fact
//! tables.

pub mod aggregate;
pub mod annotation;
pub mod chunker;
pub mod config;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod processor;
pub mod source;
pub mod stopwords;

pub use aggregate::aggregate;
pub use annotation::{build_annotator, AnnotationError, Annotator};
pub use chunker::{chunk_text, TextChunker};
pub use config::{AnnotationStrategy, Config, ConfigError};
pub use error::{ErrorPayload, PipelineError};
pub use models::{AggregatedPayload, Annotation, Block, FactRecord};
pub use pipeline::Pipeline;
pub use processor::RecordProcessor;
pub use source::{build_source, DocumentSource, SourceError};
pub use stopwords::{Stopwords, StopwordsError};
