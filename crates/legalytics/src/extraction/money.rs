//! Monetary amount extraction.
//!
//! Five currency grammars are applied independently and their results are
//! concatenated in declaration order (Rupiah, USD, EUR, GBP, JPY).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::extractor::FactExtractor;
use super::numerals::normalize_numerals;

/// Currencies recognized by the money extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Rupiah,
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    /// Declaration order; also the order matches are emitted in.
    pub const ALL: [Currency; 5] = [
        Currency::Rupiah,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rupiah => "IDR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    fn extractor_name(&self) -> &'static str {
        match self {
            Currency::Rupiah => "money.idr",
            Currency::Usd => "money.usd",
            Currency::Eur => "money.eur",
            Currency::Gbp => "money.gbp",
            Currency::Jpy => "money.jpy",
        }
    }

    fn grammar(&self) -> &'static Regex {
        &MONEY_GRAMMARS[*self as usize]
    }
}

/// One grammar per currency, indexed by `Currency as usize`.
///
/// Grammars without capture groups yield the whole match; grammars with
/// capture groups yield the concatenation of every group.
static MONEY_GRAMMARS: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        Regex::new(
            r"(?i)\b(?:\(?Rp\s*(?:\d{1,3}(?:[,.]\d{3})*(?:\.\d+)?|\d+(?:\.\d+)?)\)?|\(?Rp\s*(?:nol|nol,? nol)\)?\s*\(?Rupiah\)?)\b",
        )
        .expect("rupiah pattern should compile"),
        Regex::new(r"(USD)([+-]?[0-9]{1,3}(,?[0-9]{3})*)(\.[0-9]{1,4})")
            .expect("usd pattern should compile"),
        Regex::new(r"(€|EUR)([+-]?[0-9]{1,3}(,?[0-9]{3})*)(\.[0-9]{1,4})")
            .expect("eur pattern should compile"),
        Regex::new(r"(£|GBP)([+-]?[0-9]{1,3}(,?[0-9]{3})*)(\.[0-9]{1,4})")
            .expect("gbp pattern should compile"),
        Regex::new(r"(¥|JPY)([+-]?[0-9]{1,3}(,?[0-9]{3})*)(\.?[0-9]{0,4})")
            .expect("jpy pattern should compile"),
    ]
});

/// A single money match before and after numeral normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyMatch {
    pub currency: Currency,
    pub raw: String,
    pub value: String,
}

impl MoneyMatch {
    fn new(currency: Currency, raw: String) -> Self {
        // The literal check is case-sensitive: "RP nol" keeps its words.
        let value = if raw.contains("Rp") {
            normalize_numerals(&raw)
        } else {
            raw.clone()
        };
        Self {
            currency,
            raw,
            value,
        }
    }
}

fn raw_matches(pattern: &Regex, text: &str) -> Vec<String> {
    if pattern.captures_len() <= 1 {
        return pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
    }

    pattern
        .captures_iter(text)
        .map(|caps| {
            caps.iter()
                .skip(1)
                .map(|group| group.map_or("", |g| g.as_str()))
                .collect::<String>()
        })
        .collect()
}

fn find_currency(currency: Currency, text: &str) -> Vec<MoneyMatch> {
    raw_matches(currency.grammar(), text)
        .into_iter()
        .map(|raw| MoneyMatch::new(currency, raw))
        .collect()
}

/// All money matches, grouped by currency in declaration order.
pub fn find_money(text: &str) -> Vec<MoneyMatch> {
    Currency::ALL
        .iter()
        .flat_map(|&currency| find_currency(currency, text))
        .collect()
}

/// Normalized money strings in output order.
pub fn extract_money(text: &str) -> Vec<String> {
    find_money(text).into_iter().map(|m| m.value).collect()
}

/// Money extractor over all currencies or a single grammar.
#[derive(Debug, Clone, Copy)]
pub struct MoneyExtractor {
    currency: Option<Currency>,
}

impl MoneyExtractor {
    pub fn all() -> Self {
        Self { currency: None }
    }

    pub fn for_currency(currency: Currency) -> Self {
        Self {
            currency: Some(currency),
        }
    }
}

impl FactExtractor for MoneyExtractor {
    fn name(&self) -> &str {
        match self.currency {
            Some(currency) => currency.extractor_name(),
            None => "money",
        }
    }

    fn extract(&self, text: &str) -> Vec<String> {
        match self.currency {
            Some(currency) => find_currency(currency, text)
                .into_iter()
                .map(|m| m.value)
                .collect(),
            None => extract_money(text),
        }
    }
}
