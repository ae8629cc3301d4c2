//! Locate place names inside song lyrics and render the hit.
//!
//! Matching is insensitive to case, accents, apostrophes, dashes and most
//! punctuation, but everything returned to the caller is a verbatim slice of
//! the original lyrics.

pub mod excerpt;
pub mod highlight;
pub mod locate;
pub mod marked;
pub mod normalize;

pub use excerpt::{excerpt, ExcerptOptions, ELLIPSIS};
pub use highlight::highlight_full;
pub use locate::{locate, MatchRange};
pub use marked::{escape_html, MarkedText, Segment};
pub use normalize::{normalize, normalize_with_map, Normalized};
