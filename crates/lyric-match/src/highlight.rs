use crate::locate::locate;
use crate::marked::MarkedText;

/// Char index -> byte offset table, with `text.len()` as the final boundary.
pub(crate) struct CharOffsets<'a> {
    text: &'a str,
    byte_of_char: Vec<usize>,
}

impl<'a> CharOffsets<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut byte_of_char = Vec::with_capacity(text.len() + 1);
        byte_of_char.extend(text.char_indices().map(|(b, _)| b));
        byte_of_char.push(text.len());
        Self { text, byte_of_char }
    }

    pub(crate) fn char_len(&self) -> usize {
        self.byte_of_char.len() - 1
    }

    /// Slice by char indices; out-of-range bounds are clamped.
    pub(crate) fn slice(&self, from: usize, to: usize) -> &'a str {
        let last = self.char_len();
        let to = to.min(last);
        let from = from.min(to);
        &self.text[self.byte_of_char[from]..self.byte_of_char[to]]
    }
}

/// The whole text, with the first occurrence of `needle` emphasized.
pub fn highlight_full(text: &str, needle: &str) -> MarkedText {
    let mut out = MarkedText::new();

    let Some(range) = locate(text, needle) else {
        out.push_plain(text);
        return out;
    };

    let offsets = CharOffsets::new(text);
    out.push_plain(offsets.slice(0, range.start));
    out.push_emphasized(offsets.slice(range.start, range.end));
    out.push_plain(offsets.slice(range.end, offsets.char_len()));
    out
}
