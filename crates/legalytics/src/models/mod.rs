//! Data models for documents, per-block fact records and the analytics payload.

mod block;
mod payload;
mod record;

pub use block::{Block, DOCUMENT_META_FIELDS};
pub use payload::{AggregatedPayload, DateRow, FactTables, MoneyRow, ProhibitionRow, WordCount};
pub use record::{Annotation, FactRecord};
