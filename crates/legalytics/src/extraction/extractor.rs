//! Named extractor abstraction.

use std::collections::BTreeMap;

use super::dates::DateExtractor;
use super::money::MoneyExtractor;
use super::prohibitions::ProhibitionExtractor;

/// A grammar that turns text into an ordered list of matched strings.
pub trait FactExtractor: Send + Sync {
    /// Stable identifier (`"money"`, `"dates"`, `"prohibitions"`, `"money.usd"`, ...).
    fn name(&self) -> &str;

    /// Extract matches in output order. Never fails; no match yields an empty list.
    fn extract(&self, text: &str) -> Vec<String>;
}

/// The three document-level extractors in record field order.
pub fn default_extractors() -> Vec<Box<dyn FactExtractor>> {
    vec![
        Box::new(MoneyExtractor::all()),
        Box::new(DateExtractor),
        Box::new(ProhibitionExtractor),
    ]
}

/// Run every extractor and key the results by extractor name.
pub fn extract_all(
    extractors: &[Box<dyn FactExtractor>],
    text: &str,
) -> BTreeMap<String, Vec<String>> {
    extractors
        .iter()
        .map(|e| (e.name().to_string(), e.extract(text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extractor_names() {
        let names: Vec<String> = default_extractors()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["money", "dates", "prohibitions"]);
    }

    #[test]
    fn test_extract_all_without_cues_is_empty() {
        let text = "Pasal 1 Dalam Undang-Undang ini yang dimaksud dengan pajak adalah kontribusi wajib.";
        let results = extract_all(&default_extractors(), text);

        assert_eq!(results.len(), 3);
        assert!(results.values().all(Vec::is_empty));
    }

    #[test]
    fn test_extract_all_collects_each_grammar() {
        let text = "Ditetapkan 5 Mei 2021. Denda Rp1.000. Dilarang: membakar hutan.";
        let results = extract_all(&default_extractors(), text);

        assert_eq!(results["money"], vec!["Rp1.000"]);
        assert_eq!(results["dates"], vec!["5 Mei 2021"]);
        assert_eq!(results["prohibitions"], vec!["membakar hutan"]);
    }
}
