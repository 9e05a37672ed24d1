//! Prohibition clause extraction (`Dilarang: ...`).

use std::sync::LazyLock;

use regex::Regex;

use super::extractor::FactExtractor;

static CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:dilarang|Dilarang):").expect("cue pattern should compile"));

/// Clause text following each cue, in order of appearance.
///
/// A clause starts at the first non-whitespace character after the cue, which
/// must be a lowercase ASCII letter, and runs to the last period before the
/// next cue (or the end of the text). Newlines become spaces and the result
/// is trimmed.
pub fn extract_prohibitions(text: &str) -> Vec<String> {
    let cues: Vec<(usize, usize)> = CUE.find_iter(text).map(|m| (m.start(), m.end())).collect();

    cues.iter()
        .enumerate()
        .filter_map(|(i, &(_, clause_start))| {
            let clause_end = cues.get(i + 1).map_or(text.len(), |&(start, _)| start);
            clause_after_cue(&text[clause_start..clause_end])
        })
        .map(|clause| clause.replace('\n', " ").trim().to_string())
        .collect()
}

fn clause_after_cue(segment: &str) -> Option<&str> {
    let body = segment.trim_start();
    if !body.starts_with(|c: char| c.is_ascii_lowercase()) {
        return None;
    }
    let period = body.rfind('.')?;
    Some(&body[..period])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProhibitionExtractor;

impl FactExtractor for ProhibitionExtractor {
    fn name(&self) -> &str {
        "prohibitions"
    }

    fn extract(&self, text: &str) -> Vec<String> {
        extract_prohibitions(text)
    }
}
