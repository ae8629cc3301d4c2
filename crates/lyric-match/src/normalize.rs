use unicode_normalization::UnicodeNormalization;

/// Normalized view of a text plus, for every normalized character, the index
/// of the source character it came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    pub text: String,
    pub index_map: Vec<usize>,
}

impl Normalized {
    /// Length of the normalized text in characters (equals `index_map.len()`).
    pub fn char_len(&self) -> usize {
        self.index_map.len()
    }
}

/// Lowercased, accent-free form of `text` with separator runs collapsed to a
/// single space.
pub fn normalize(text: &str) -> String {
    normalize_with_map(text).text
}

/// Same as [`normalize`], keeping the char index of the originating source
/// character for every output character.
pub fn normalize_with_map(text: &str) -> Normalized {
    let mut out = String::with_capacity(text.len());
    let mut index_map = Vec::with_capacity(text.len());

    for (i, ch) in text.chars().enumerate() {
        if is_separator(ch) {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
                index_map.push(i);
            }
            continue;
        }

        for folded in fold_char(ch) {
            out.push(folded);
            index_map.push(i);
        }
    }

    while out.ends_with(' ') {
        out.pop();
        index_map.pop();
    }

    Normalized {
        text: out,
        index_map,
    }
}

/// Decompose, drop combining diacritics, lowercase.
fn fold_char(ch: char) -> impl Iterator<Item = char> {
    std::iter::once(ch)
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .flat_map(char::to_lowercase)
}

fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            '\u{2019}'
                | '\''
                | '-'
                | '\u{2010}'
                | '\u{2011}'
                | '\u{2012}'
                | '\u{2013}'
                | '\u{2014}'
                | '\u{2015}'
                | '.'
                | ','
                | ';'
                | ':'
                | '!'
                | '?'
                | '('
                | ')'
                | '{'
                | '}'
                | '['
                | ']'
                | '"'
                | '«'
                | '»'
        )
}
