use serde::{Deserialize, Serialize};

use crate::highlight::CharOffsets;
use crate::locate::locate;
use crate::marked::MarkedText;

pub const ELLIPSIS: char = '…';

/// Window sizes for [`excerpt`], all in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptOptions {
    /// Context kept before the match.
    pub radius_before: usize,
    /// Context kept after the match.
    pub radius_after: usize,
    /// Head length shown when there is no match.
    pub fallback_len: usize,
}

impl ExcerptOptions {
    /// Symmetric window used for list previews.
    pub const PREVIEW: Self = Self {
        radius_before: 90,
        radius_after: 90,
        fallback_len: 140,
    };

    /// Short look-behind, longer look-ahead; used for search snippets.
    pub const SNIPPET: Self = Self {
        radius_before: 42,
        radius_after: 80,
        fallback_len: 180,
    };

    pub const fn new(radius_before: usize, radius_after: usize, fallback_len: usize) -> Self {
        Self {
            radius_before,
            radius_after,
            fallback_len,
        }
    }
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        Self::PREVIEW
    }
}

/// Bounded window of `text` around the first occurrence of `needle`.
///
/// Without a match this is the head of the text cut at
/// `opts.fallback_len` characters.
pub fn excerpt(text: &str, needle: &str, opts: &ExcerptOptions) -> MarkedText {
    let offsets = CharOffsets::new(text);
    let total = offsets.char_len();

    let Some(range) = locate(text, needle) else {
        return head(&offsets, opts.fallback_len);
    };

    let from = range.start.saturating_sub(opts.radius_before);
    let to = range.end.saturating_add(opts.radius_after).min(total);

    let mut before = String::new();
    if from > 0 {
        before.push(ELLIPSIS);
    }
    before.push_str(offsets.slice(from, range.start));

    let mut after = offsets.slice(range.end, to).to_string();
    if to < total {
        after.push(ELLIPSIS);
    }

    let mut out = MarkedText::new();
    out.push_plain(before);
    out.push_emphasized(offsets.slice(range.start, range.end));
    out.push_plain(after);
    out
}

fn head(offsets: &CharOffsets<'_>, max_chars: usize) -> MarkedText {
    let mut text = offsets.slice(0, max_chars).to_string();
    if offsets.char_len() > max_chars {
        text.push(ELLIPSIS);
    }

    let mut out = MarkedText::new();
    out.push_plain(text);
    out
}
