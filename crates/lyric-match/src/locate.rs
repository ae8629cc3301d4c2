use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, normalize_with_map};

/// Span of the first match in the source text, as char indices (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Find the first case-, accent- and punctuation-insensitive occurrence of
/// `needle` in `text`.
///
/// Both sides go through [`normalize_with_map`]; the leftmost hit in the
/// normalized haystack is mapped back to source char indices.
pub fn locate(text: &str, needle: &str) -> Option<MatchRange> {
    if text.trim().is_empty() || needle.trim().is_empty() {
        return None;
    }

    let needle_norm = normalize(needle);
    if needle_norm.is_empty() {
        return None;
    }

    let hay = normalize_with_map(text);
    let byte_pos = hay.text.find(&needle_norm)?;

    let idx = hay.text[..byte_pos].chars().count();
    let len = needle_norm.chars().count();

    let start = *hay.index_map.get(idx)?;
    let last = *hay.index_map.get(idx + len - 1)?;

    Some(MatchRange {
        start,
        end: last + 1,
    })
}
