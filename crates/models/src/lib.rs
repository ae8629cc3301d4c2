use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use lyric_match::ExcerptOptions;

pub mod geo;

pub use geo::{haversine_km, BoundingBox, Coordinates};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub lyrics: String,
    /// Place names the song is tagged with.
    #[serde(default)]
    pub places: Vec<String>,
}

impl Song {
    pub fn decade(&self) -> Option<Decade> {
        self.year.map(Decade::of_year)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commune: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// On-disk catalog (`data.json`).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogRoot {
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

/// Curated walk through places, one song per stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub stops: Vec<PlaylistStop>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistStop {
    /// Place name, matched against the catalog places after normalization.
    pub place: String,
    pub song_id: String,
}

/// First year of a decade, e.g. 1990 for the nineties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decade(u16);

impl Decade {
    pub const fn of_year(year: u16) -> Self {
        Self(year / 10 * 10)
    }

    pub const fn start_year(self) -> u16 {
        self.0
    }

    pub fn contains(self, year: u16) -> bool {
        Self::of_year(year) == self
    }
}

impl std::str::FromStr for Decade {
    type Err = eyre::Report;

    /// Accepts "1990", "1990s", "90s" and "90".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('s')
            .or_else(|| trimmed.strip_suffix('S'))
            .unwrap_or(trimmed);

        let value = digits
            .parse::<u16>()
            .map_err(|_| eyre::eyre!("invalid decade: {s:?}"))?;

        let year = match digits.len() {
            2 if value >= 30 => 1900 + value,
            2 => 2000 + value,
            4 => value,
            _ => return Err(eyre::eyre!("invalid decade: {s:?}")),
        };

        if year % 10 != 0 {
            return Err(eyre::eyre!("decade must end in 0: {s:?}"));
        }

        Ok(Self(year))
    }
}

impl std::fmt::Display for Decade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Song browsing filters; unset fields accept everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decade: Option<Decade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SongFilter {
    pub fn is_empty(&self) -> bool {
        self.artist.is_none()
            && self.style.is_none()
            && self.decade.is_none()
            && self.language.is_none()
    }

    pub fn matches(&self, song: &Song) -> bool {
        if let Some(artist) = &self.artist {
            if !same_label(artist, &song.artist) {
                return false;
            }
        }

        if let Some(style) = &self.style {
            if !song.style.as_deref().is_some_and(|s| same_label(style, s)) {
                return false;
            }
        }

        if let Some(language) = &self.language {
            if !song
                .language
                .as_deref()
                .is_some_and(|l| same_label(language, l))
            {
                return false;
            }
        }

        if let Some(decade) = self.decade {
            if !song.year.is_some_and(|y| decade.contains(y)) {
                return false;
            }
        }

        true
    }
}

fn same_label(a: &str, b: &str) -> bool {
    lyric_match::normalize(a) == lyric_match::normalize(b)
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RenderFormat {
    #[default]
    Plain,
    Markdown,
    Html,
    Json,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExcerptPreset {
    /// List previews: 90 chars on each side, 140 char head.
    #[default]
    Preview,
    /// Search snippets: 42 before, 80 after, 180 char head.
    Snippet,
}

impl ExcerptPreset {
    pub const fn options(self) -> ExcerptOptions {
        match self {
            Self::Preview => ExcerptOptions::PREVIEW,
            Self::Snippet => ExcerptOptions::SNIPPET,
        }
    }
}
