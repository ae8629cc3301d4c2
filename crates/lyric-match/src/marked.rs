use serde::{Deserialize, Serialize};

/// Reserved delimiter pair used by the inline markup form.
pub const EMPHASIS_DELIMITER: &str = "**";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Ordered run of verbatim text segments, some of them marked for emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct MarkedText {
    segments: Vec<Segment>,
}

impl MarkedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment; empty text is dropped.
    pub fn push(&mut self, segment: Segment) {
        if !segment.text.is_empty() {
            self.segments.push(segment);
        }
    }

    pub fn push_plain(&mut self, text: impl Into<String>) {
        self.push(Segment::plain(text));
    }

    pub fn push_emphasized(&mut self, text: impl Into<String>) {
        self.push(Segment::emphasized(text));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_match(&self) -> bool {
        self.segments.iter().any(|s| s.emphasized)
    }

    /// The first emphasized span, if any.
    pub fn emphasized(&self) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.emphasized)
            .map(|s| s.text.as_str())
    }

    pub fn to_plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Inline form with emphasized spans wrapped in `**`.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if segment.emphasized {
                out.push_str(EMPHASIS_DELIMITER);
                out.push_str(&segment.text);
                out.push_str(EMPHASIS_DELIMITER);
            } else {
                out.push_str(&segment.text);
            }
        }
        out
    }

    /// Escapes every segment, then wraps emphasized ones in `<mark>`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if segment.emphasized {
                out.push_str("<mark>");
                escape_html_into(&segment.text, &mut out);
                out.push_str("</mark>");
            } else {
                escape_html_into(&segment.text, &mut out);
            }
        }
        out
    }

    /// Parses the `**` inline form back into segments. A trailing unpaired
    /// delimiter stays literal.
    pub fn from_markup(markup: &str) -> Self {
        let mut pieces = markup.split(EMPHASIS_DELIMITER).collect::<Vec<_>>();

        let mut tail = None;
        if pieces.len() % 2 == 0 {
            let last = pieces.pop().unwrap_or_default();
            let before = pieces.pop().unwrap_or_default();
            tail = Some(format!("{before}{EMPHASIS_DELIMITER}{last}"));
        }

        let mut out = Self::new();
        for (i, piece) in pieces.into_iter().enumerate() {
            if i % 2 == 1 {
                out.push_emphasized(piece);
            } else {
                out.push_plain(piece);
            }
        }
        if let Some(tail) = tail {
            out.push_plain(tail);
        }
        out
    }
}

impl From<Vec<Segment>> for MarkedText {
    fn from(segments: Vec<Segment>) -> Self {
        let mut out = Self::new();
        for segment in segments {
            out.push(segment);
        }
        out
    }
}

impl From<MarkedText> for Vec<Segment> {
    fn from(text: MarkedText) -> Self {
        text.segments
    }
}

impl std::fmt::Display for MarkedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_html_into(s, &mut out);
    out
}

fn escape_html_into(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
