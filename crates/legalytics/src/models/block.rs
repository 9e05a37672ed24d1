//! Block model - one unit of legal-document text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document-level fields copied onto every block when a stored document is
/// flattened. They are carried through untouched.
pub const DOCUMENT_META_FIELDS: &[&str] = &[
    "PeraturanId",
    "Nomor",
    "Slug",
    "Judul",
    "No",
    "Tahun",
    "Bentuk",
    "Status",
    "Bidang",
    "Source",
    "PeraturanGoId",
    "TanggalPenetapan",
    "TanggalPengundangan",
];

/// One article/paragraph of a legal document as returned by a document source.
///
/// Only `content` is read by the extraction pipeline. Everything else lives in
/// `metadata` and is passed through to callers unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Block {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            metadata: Map::new(),
        }
    }

    /// A block whose content field is missing entirely.
    pub fn without_content() -> Self {
        Self::default()
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Content text, or `""` when absent.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}
