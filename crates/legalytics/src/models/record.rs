//! Per-block fact record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output of the annotation capability for one chunk of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// A recognized entity span (token-classification output).
    Entity {
        word: String,
        entity_group: String,
        score: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<usize>,
    },
    /// A short natural-language insight about the chunk.
    Insight { text: String },
}

/// Facts extracted from one block.
///
/// `annotations` is `None` when no annotation step ran or when it failed;
/// the three pattern-based fields are always populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    pub content: String,
    pub money: Vec<String>,
    pub dates: Vec<String>,
    pub prohibitions: Vec<String>,
    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl FactRecord {
    /// Record for a block with no content: every fact list is empty.
    pub fn empty(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn has_facts(&self) -> bool {
        !(self.money.is_empty() && self.dates.is_empty() && self.prohibitions.is_empty())
    }

    /// Insight text generated for this block.
    ///
    /// Returns `None` when no insight annotation exists, and `Some("")` when
    /// insights were generated but all of them were empty.
    pub fn insight(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .annotations
            .as_ref()?
            .iter()
            .filter_map(|a| match a {
                Annotation::Insight { text } => Some(text.as_str()),
                Annotation::Entity { .. } => None,
            })
            .collect();

        if texts.is_empty() {
            return None;
        }

        Some(
            texts
                .into_iter()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Entity annotations only.
    pub fn entities(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .flatten()
            .filter(|a| matches!(a, Annotation::Entity { .. }))
    }
}
