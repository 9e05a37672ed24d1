//! Document-level aggregation of fact records.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::AggregationConfig;
use crate::models::{
    AggregatedPayload, DateRow, FactRecord, FactTables, MoneyRow, ProhibitionRow, WordCount,
};
use crate::stopwords::Stopwords;

/// Word tokens or runs of punctuation.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<word>\w+)|(?P<punct>[^\w\s]+)").expect("TOKEN regex should compile")
});

/// Fold a document's records into the analytics payload.
pub fn aggregate(
    records: &[FactRecord],
    stopwords: &Stopwords,
    config: &AggregationConfig,
) -> AggregatedPayload {
    let text = records
        .iter()
        .map(|r| r.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    AggregatedPayload {
        word_cloud: word_frequencies(&text, stopwords, config),
        tables: fact_tables(records),
    }
}

/// Lower-cased tokens of `text` that survive the configured filters.
pub fn tokenize(text: &str, stopwords: &Stopwords, config: &AggregationConfig) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .captures_iter(&lowered)
        .filter_map(|caps| {
            if let Some(word) = caps.name("word") {
                let word = word.as_str();
                if config.strip_digits && word.chars().all(char::is_numeric) {
                    return None;
                }
                Some(word)
            } else if config.strip_punctuation {
                None
            } else {
                caps.name("punct").map(|m| m.as_str())
            }
        })
        .filter(|token| !stopwords.contains(token))
        .map(str::to_string)
        .collect()
}

/// The `top_k` most frequent tokens, most frequent first.
///
/// Equal counts keep the order in which the tokens first appear.
pub fn word_frequencies(
    text: &str,
    stopwords: &Stopwords,
    config: &AggregationConfig,
) -> Vec<WordCount> {
    let mut counts: Vec<WordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text, stopwords, config) {
        match index.get(&token) {
            Some(&i) => counts[i].value += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push(WordCount {
                    text: token,
                    value: 1,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order.
    counts.sort_by(|a, b| b.value.cmp(&a.value));
    counts.truncate(config.top_k);
    counts
}

/// Flatten every record's matches in (record, match) order.
pub fn fact_tables(records: &[FactRecord]) -> FactTables {
    let mut tables = FactTables::default();
    for record in records {
        let insight = record.insight();
        tables
            .money
            .extend(record.money.iter().map(|value| MoneyRow {
                value: value.clone(),
                insight: insight.clone(),
            }));
        tables
            .prohibitions
            .extend(record.prohibitions.iter().map(|text| ProhibitionRow {
                text: text.clone(),
                insight: insight.clone(),
            }));
        tables.dates.extend(record.dates.iter().map(|date| DateRow {
            date: date.clone(),
            insight: insight.clone(),
        }));
    }
    tables
}
