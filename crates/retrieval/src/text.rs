//! Paragraph chunking and tokenization.
//!
//! Sizes are counted in `char`s, not bytes, so accented Portuguese text
//! chunks the same regardless of encoding width.

/// Default maximum chunk size, in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 900;

/// Split text into chunks of whole paragraphs.
///
/// Paragraphs are separated by blank lines; empty ones are skipped. A chunk
/// accumulates paragraphs until the next one would push it past `max_chars`,
/// at which point the chunk is emitted and a new one starts with the
/// paragraph that did not fit. A single paragraph larger than `max_chars`
/// becomes its own oversized chunk.
pub fn chunk_paragraphs(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buf = String::new();
    let mut buf_chars = 0usize;

    for para in text.split("\n\n") {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }
        let para_chars = para.chars().count();

        if buf_chars + para_chars + 2 <= max_chars {
            if !buf.is_empty() {
                buf.push_str("\n\n");
            }
            buf.push_str(para);
            buf_chars = buf.chars().count();
        } else {
            if !buf.is_empty() {
                chunks.push(std::mem::take(&mut buf));
            }
            buf.push_str(para);
            buf_chars = para_chars;
        }
    }

    if !buf.is_empty() {
        chunks.push(buf);
    }
    chunks
}

/// Lowercase, strip everything that is not a letter (accents included),
/// digit, or whitespace, then split and keep tokens of 3+ characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= 3)
        .map(str::to_string)
        .collect()
}
