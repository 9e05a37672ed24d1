//! Pattern-based fact extraction for Indonesian legal text.
//!
//! Each grammar is a pure function over text and is also exposed through the
//! `FactExtractor` trait so callers (and tests) can address it by name.

mod dates;
mod extractor;
mod money;
mod numerals;
mod prohibitions;

pub use dates::{extract_dates, DateExtractor, MONTHS};
pub use extractor::{default_extractors, extract_all, FactExtractor};
pub use money::{extract_money, find_money, Currency, MoneyExtractor, MoneyMatch};
pub use numerals::{normalize_numerals, NUMERAL_WORDS};
pub use prohibitions::{extract_prohibitions, ProhibitionExtractor};
