//! Splits long documents into bounded pieces for the per-chunk summary pass.

/// Split `text` into trimmed, non-empty chunks of at most `max_chars` characters.
///
/// Each window is shortened to end at the last newline inside it, as long as
/// that newline lies strictly after the window start. Without such a newline
/// the window is cut at full width. The next window starts where the previous
/// one ended, so the walk always makes progress. A `max_chars` of zero is
/// treated as one.
#[must_use]
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = len.min(start + max_chars);

        if end < len
            && let Some(offset) = chars[start + 1..end].iter().rposition(|&c| c == '\n')
        {
            end = start + 1 + offset;
        }

        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        start = end;
    }

    chunks
}
