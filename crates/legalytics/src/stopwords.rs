//! Stopword list loading.
//!
//! Lists use the Tala format: one word per line, optionally followed by
//! whitespace-separated annotations that are ignored.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StopwordsError {
    #[error("Failed to read stopword list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable set of lowercase stopwords, matched by exact word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parse list contents: the first token of each non-blank line.
    pub fn parse(contents: &str) -> Self {
        Self::from_words(contents.lines().filter_map(|line| line.split_whitespace().next()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StopwordsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| StopwordsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let stopwords = Self::parse(&contents);
        debug!(
            "Loaded {} stopwords from {}",
            stopwords.len(),
            path.display()
        );
        Ok(stopwords)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_takes_first_token() {
        let stopwords = Stopwords::parse("yang\ndan 123\n\n  di\tx\nDengan\n");
        assert_eq!(stopwords.len(), 4);
        assert!(stopwords.contains("yang"));
        assert!(stopwords.contains("dan"));
        assert!(stopwords.contains("di"));
        assert!(stopwords.contains("dengan"));
        assert!(!stopwords.contains("123"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "yang").unwrap();
        writeln!(file, "atau").unwrap();

        let stopwords = Stopwords::load(file.path()).unwrap();
        assert!(stopwords.contains("atau"));
        assert_eq!(stopwords.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Stopwords::load("/nonexistent/stopwords.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/stopwords.txt"));
    }

    #[test]
    fn test_empty() {
        assert!(Stopwords::empty().is_empty());
        assert!(!Stopwords::empty().contains("yang"));
    }
}
