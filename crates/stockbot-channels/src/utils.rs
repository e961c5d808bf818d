//! Shared utilities for channel implementations.

/// Split a long message into chunks of at most `max_chars` characters.
///
/// Platform limits are counted in characters, so boundaries always fall on
/// UTF-8 char boundaries. Prefers splitting right after a newline.
pub fn split_message(text: &str, max_chars: usize) -> Vec<&str> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let end = byte_offset_of_char(rest, max_chars);
        let break_at = if end < rest.len() {
            rest[..end].rfind('\n').map(|i| i + 1).unwrap_or(end)
        } else {
            end
        };
        let (chunk, tail) = rest.split_at(break_at);
        chunks.push(chunk);
        rest = tail;
    }

    chunks
}

/// Byte offset of the `n`th char, or the string length when shorter.
fn byte_offset_of_char(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map(|(i, _)| i).unwrap_or(text.len())
}
