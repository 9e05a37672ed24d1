//! Ad-hoc extraction on raw text.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use legalytics::extraction::{extract_dates, extract_money, extract_prohibitions};

use super::to_json;

/// Facts found in one text, serialized with keys in this field order.
#[derive(Debug, Serialize)]
struct ExtractedFacts {
    money: Vec<String>,
    dates: Vec<String>,
    prohibitions: Vec<String>,
}

fn extract_facts(text: &str) -> ExtractedFacts {
    ExtractedFacts {
        money: extract_money(text),
        dates: extract_dates(text),
        prohibitions: extract_prohibitions(text),
    }
}

pub async fn cmd_extract(file: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("reading stdin")?;
            buf
        }
    };

    println!("{}", to_json(&extract_facts(&text), pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_key_order() {
        let text = "Pada tanggal 1 Januari 2020 denda Rp1.000. Setiap orang dilarang: merokok.";
        let json = to_json(&extract_facts(text), false).unwrap();
        assert!(json.starts_with(r#"{"money":["Rp1.000"],"dates":"#));
        let money = json.find("\"money\"").unwrap();
        let dates = json.find("\"dates\"").unwrap();
        let prohibitions = json.find("\"prohibitions\"").unwrap();
        assert!(money < dates && dates < prohibitions);
    }

    #[test]
    fn test_empty_text_keeps_all_keys() {
        let json = to_json(&extract_facts(""), false).unwrap();
        assert_eq!(json, r#"{"money":[],"dates":[],"prohibitions":[]}"#);
    }
}
