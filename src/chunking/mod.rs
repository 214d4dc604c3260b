//! Fixed-window text chunking for embedding input.
//!
//! Page text is cut into contiguous windows of at most `max_chars`
//! characters. There is no overlap and no sentence awareness: a chunk only
//! exists to keep each embedding input under the model's context limit.

/// Characters per chunk when embedding page text.
pub const PAGE_CHUNK_CHARS: usize = 1500;

/// Lazy iterator over fixed-size character windows of a string.
///
/// Empty input yields exactly one empty chunk, so every page produces at
/// least one embedding.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    max_chars: usize,
    emitted_empty: bool,
}

/// Split `text` into windows of at most `max_chars` characters.
///
/// Windows are measured in Unicode scalar values and never split a UTF-8
/// sequence. A `max_chars` of zero is treated as one.
pub fn chunk_text(text: &str, max_chars: usize) -> Chunks<'_> {
    Chunks {
        rest: text,
        max_chars: max_chars.max(1),
        emitted_empty: false,
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            if self.emitted_empty {
                return None;
            }
            self.emitted_empty = true;
            return Some("");
        }
        // Any non-empty input suppresses the trailing empty chunk.
        self.emitted_empty = true;

        let end = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
