//! Indonesian long-form date extraction (`17 Agustus 1945`).

use std::sync::LazyLock;

use regex::Regex;

use super::extractor::FactExtractor;

/// Canonical Indonesian month names.
pub const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let months = MONTHS.join("|");
    Regex::new(&format!(r"\b(?:\d{{1,2}}\s(?:{months})\s\d{{4}})\b"))
        .expect("date pattern should compile")
});

/// Day-month-year substrings, verbatim. Day ranges are not validated.
pub fn extract_dates(text: &str) -> Vec<String> {
    DATE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl FactExtractor for DateExtractor {
    fn name(&self) -> &str {
        "dates"
    }

    fn extract(&self, text: &str) -> Vec<String> {
        extract_dates(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_date() {
        assert_eq!(extract_dates("tanggal 17 Agustus 1945"), vec!["17 Agustus 1945"]);
    }

    #[test]
    fn test_multiple_dates_in_order() {
        let text = "Ditetapkan di Jakarta pada tanggal 5 Mei 2021\nDiundangkan pada tanggal 12 Desember 2022";
        assert_eq!(extract_dates(text), vec!["5 Mei 2021", "12 Desember 2022"]);
    }

    #[test]
    fn test_every_month_is_recognized() {
        for month in MONTHS {
            let text = format!("pada 1 {month} 2000.");
            assert_eq!(extract_dates(&text), vec![format!("1 {month} 2000")]);
        }
    }

    #[test]
    fn test_malformed_month_is_rejected() {
        assert!(extract_dates("17 Agustusan 1945").is_empty());
        assert!(extract_dates("17 Agst 1945").is_empty());
        assert!(extract_dates("17 agustus 1945").is_empty());
    }

    #[test]
    fn test_shape_is_strict() {
        assert!(extract_dates("123 Januari 2020").is_empty());
        assert!(extract_dates("1 Januari 20201").is_empty());
        assert!(extract_dates("1 Januari 20").is_empty());
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(extract_dates("31 Februari 2020"), vec!["31 Februari 2020"]);
        assert_eq!(extract_dates("99 Juni 2020"), vec!["99 Juni 2020"]);
    }

    #[test]
    fn test_no_dates() {
        assert!(extract_dates("").is_empty());
        assert!(extract_dates("Pasal 5 ayat (2)").is_empty());
    }
}
