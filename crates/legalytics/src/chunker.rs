//! Fixed-width text chunking for length-limited annotation backends.

/// Default chunk length in characters.
pub const DEFAULT_CHUNK_CHARS: usize = 512;

/// Splits text into contiguous, non-overlapping pieces of at most
/// `max_chars` characters. Cuts are hard: no word or sentence alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    max_chars: usize,
}

impl TextChunker {
    /// A zero length is treated as one character per chunk.
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Chunks borrow from `text` and concatenate back to it exactly.
    /// Empty or whitespace-only text yields no chunks.
    pub fn chunk<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::with_capacity(text.len() / self.max_chars + 1);
        let mut start = 0;
        let mut count = 0;
        for (idx, _) in text.char_indices() {
            if count == self.max_chars {
                chunks.push(&text[start..idx]);
                start = idx;
                count = 0;
            }
            count += 1;
        }
        chunks.push(&text[start..]);
        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_CHARS)
    }
}

/// Convenience wrapper around `TextChunker::chunk`.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    TextChunker::new(max_chars).chunk(text)
}
