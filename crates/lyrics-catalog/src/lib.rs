use std::path::Path;

use eyre::WrapErr;
use lyric_match::{excerpt, highlight_full, normalize, ExcerptOptions, MarkedText};
use models::{
    haversine_km, BoundingBox, CatalogRoot, Coordinates, Place, Playlist, Song, SongFilter,
};
use serde::Serialize;

/// A song whose lyrics (or tags) refer to a place.
#[derive(Debug, Clone, Serialize)]
pub struct Mention {
    pub song_id: String,
    pub title: String,
    pub artist: String,
    /// False when the song is only tagged with the place.
    pub in_lyrics: bool,
    pub excerpt: MarkedText,
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyPlace<'a> {
    pub place: &'a Place,
    pub distance_km: f64,
}

/// A playlist with every stop looked up in the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPlaylist<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub stops: Vec<ResolvedStop<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedStop<'a> {
    pub place_name: &'a str,
    /// `None` when no catalog place carries that name.
    pub place: Option<&'a Place>,
    pub song_id: &'a str,
    pub title: Option<&'a str>,
    pub artist: Option<&'a str>,
    /// `None` when the song is not in the catalog.
    pub excerpt: Option<MarkedText>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    places: Vec<Place>,
    playlists: Vec<Playlist>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_root(root: CatalogRoot) -> Self {
        Self {
            songs: root.songs,
            places: root.places,
            playlists: root.playlists,
        }
    }

    /// Reads `data.json`. A missing file yields an empty catalog and `false`.
    pub fn load(path: &Path) -> eyre::Result<(Self, bool)> {
        if !path.exists() {
            tracing::warn!(
                "Catalog not found at {} (using empty catalog)",
                path.display()
            );
            return Ok((Self::empty(), false));
        }

        let bytes =
            std::fs::read(path).wrap_err_with(|| format!("read catalog: {}", path.display()))?;
        let root: CatalogRoot = serde_json::from_slice(&bytes)
            .wrap_err_with(|| format!("parse catalog: {}", path.display()))?;

        let catalog = Self::from_root(root);
        tracing::info!(
            "Catalog loaded from {} ({} songs, {} places, {} playlists)",
            path.display(),
            catalog.song_count(),
            catalog.place_count(),
            catalog.playlists.len()
        );

        Ok((catalog, true))
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn song(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    /// Catalog place whose normalized name equals `name`.
    pub fn place(&self, name: &str) -> Option<&Place> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        self.places.iter().find(|p| normalize(&p.name) == wanted)
    }

    /// Resolves playlist `id`, stop by stop in file order, with an excerpt of
    /// each stop's song around its place.
    pub fn playlist(
        &self,
        id: &str,
        opts: &ExcerptOptions,
    ) -> eyre::Result<ResolvedPlaylist<'_>> {
        let playlist = self
            .playlists
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| eyre::eyre!("playlist not found: {id}"))?;

        let stops = playlist
            .stops
            .iter()
            .map(|stop| {
                let song = self.song(&stop.song_id);
                if song.is_none() {
                    tracing::warn!(
                        "Playlist {} refers to unknown song {}",
                        playlist.id,
                        stop.song_id
                    );
                }
                ResolvedStop {
                    place_name: &stop.place,
                    place: self.place(&stop.place),
                    song_id: &stop.song_id,
                    title: song.map(|s| s.title.as_str()),
                    artist: song.map(|s| s.artist.as_str()),
                    excerpt: song.map(|s| excerpt(&s.lyrics, &stop.place, opts)),
                }
            })
            .collect();

        Ok(ResolvedPlaylist {
            id: &playlist.id,
            title: &playlist.title,
            description: playlist.description.as_deref(),
            stops,
        })
    }

    /// Songs passing `filter` that mention `place` in their lyrics or tags,
    /// in catalog order.
    pub fn mentions(
        &self,
        place: &str,
        filter: &SongFilter,
        opts: &ExcerptOptions,
    ) -> Vec<Mention> {
        let place_norm = normalize(place);
        if place_norm.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for song in self.songs.iter().filter(|s| filter.matches(s)) {
            let excerpt = excerpt(&song.lyrics, place, opts);
            let in_lyrics = excerpt.has_match();
            let tagged = song.places.iter().any(|p| normalize(p) == place_norm);

            if !in_lyrics && !tagged {
                continue;
            }

            out.push(Mention {
                song_id: song.id.clone(),
                title: song.title.clone(),
                artist: song.artist.clone(),
                in_lyrics,
                excerpt,
            });
        }

        tracing::debug!(
            "{} mentions of {:?} among {} songs",
            out.len(),
            place,
            self.songs.len()
        );
        out
    }

    /// Full lyrics of a song with the place highlighted.
    pub fn lyrics_for(&self, song_id: &str, place: &str) -> Option<MarkedText> {
        self.song(song_id).map(|song| highlight_full(&song.lyrics, place))
    }

    /// Places whose name or commune contains `query`. Exact names rank
    /// first, then prefixes, then other hits.
    pub fn search_places(&self, query: &str, limit: usize) -> Vec<&Place> {
        let q = normalize(query);
        if q.is_empty() {
            return Vec::new();
        }

        let mut ranked = self
            .places
            .iter()
            .filter_map(|place| {
                let name = normalize(&place.name);
                let rank = if name == q {
                    0
                } else if name.starts_with(&q) {
                    1
                } else if name.contains(&q) {
                    2
                } else if place
                    .commune
                    .as_deref()
                    .is_some_and(|c| normalize(c).contains(&q))
                {
                    3
                } else {
                    return None;
                };
                Some((rank, place))
            })
            .collect::<Vec<_>>();

        ranked.sort_by_key(|(rank, _)| *rank);
        ranked
            .into_iter()
            .take(limit.max(1))
            .map(|(_, place)| place)
            .collect()
    }

    /// Closest place names by edit distance, for "did you mean" hints.
    pub fn suggest_places(&self, query: &str, limit: usize) -> Vec<String> {
        let q = normalize(query);
        if q.is_empty() {
            return Vec::new();
        }

        let mut scored = self
            .places
            .iter()
            .map(|p| (p, strsim::levenshtein(&q, &normalize(&p.name))))
            .collect::<Vec<_>>();
        scored.sort_by_key(|(_, d)| *d);
        scored
            .into_iter()
            .take(limit.max(1))
            .map(|(p, _)| p.name.clone())
            .collect()
    }

    /// Places within `radius_km` of `center`, nearest first.
    pub fn nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
        limit: usize,
    ) -> Vec<NearbyPlace<'_>> {
        let mut hits = self
            .places
            .iter()
            .map(|place| NearbyPlace {
                place,
                distance_km: haversine_km(center, place.coordinates()),
            })
            .filter(|hit| hit.distance_km <= radius_km)
            .collect::<Vec<_>>();

        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        hits.truncate(limit.max(1));
        hits
    }

    pub fn within(&self, bbox: &BoundingBox) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|p| bbox.contains(p.coordinates()))
            .collect()
    }
}
