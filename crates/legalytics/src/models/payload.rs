//! Document-level analytics payload.
//!
//! Field names and nesting (`wordCloud`, `tables.money`, `tables.prohibitions`,
//! `tables.dates`) are consumed by the dashboard and must not change.

use serde::{Deserialize, Serialize};

/// One word-cloud entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub text: String,
    pub value: usize,
}

/// A money table row. `insight` serializes as `null` when unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRow {
    pub value: String,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProhibitionRow {
    pub text: String,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRow {
    pub date: String,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactTables {
    pub money: Vec<MoneyRow>,
    pub prohibitions: Vec<ProhibitionRow>,
    pub dates: Vec<DateRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedPayload {
    #[serde(rename = "wordCloud")]
    pub word_cloud: Vec<WordCount>,
    pub tables: FactTables,
}

impl AggregatedPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
