use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::WrapErr;
use lyric_match::{excerpt, highlight_full, ExcerptOptions};
use lyrics_catalog::Catalog;
use models::{BoundingBox, Coordinates, Decade, ExcerptPreset, RenderFormat, SongFilter};

use crate::config::Config;
use crate::render;

#[derive(Debug, Parser)]
#[command(name = "ile-de-sons")]
#[command(about = "Find Île-de-France places in song lyrics")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "Catalog JSON (overrides LYRICS_DATA_PATH)"
    )]
    pub data: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = "plain",
        value_name = "FORMAT",
        help = "Output format: plain, markdown, html or json"
    )]
    pub format: RenderFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Print a text with the first mention of a place highlighted")]
    Highlight {
        #[arg(long, help = "Place name to look for")]
        place: String,
        #[arg(long, value_name = "FILE", help = "Read the text from FILE instead of stdin")]
        file: Option<PathBuf>,
    },
    #[command(about = "Print a short window of a text around a place mention")]
    Excerpt {
        #[arg(long, help = "Place name to look for")]
        place: String,
        #[arg(long, value_name = "FILE", help = "Read the text from FILE instead of stdin")]
        file: Option<PathBuf>,
        #[arg(long, help = "Window preset: preview or snippet")]
        preset: Option<ExcerptPreset>,
        #[arg(long, value_name = "CHARS", help = "Characters kept before the match")]
        before: Option<usize>,
        #[arg(long, value_name = "CHARS", help = "Characters kept after the match")]
        after: Option<usize>,
        #[arg(long, value_name = "CHARS", help = "Head length when nothing matches")]
        fallback: Option<usize>,
    },
    #[command(about = "List catalog songs that mention a place")]
    Mentions {
        place: String,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        style: Option<String>,
        #[arg(long, help = "e.g. 1990, 1990s or 90s")]
        decade: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long, help = "Window preset: preview or snippet")]
        preset: Option<ExcerptPreset>,
    },
    #[command(about = "Print the full lyrics of a catalog song with a place highlighted")]
    Lyrics {
        song_id: String,
        #[arg(long)]
        place: String,
    },
    #[command(about = "Search catalog places by name or commune, or list those inside a box")]
    Places {
        query: Option<String>,
        #[arg(
            long,
            allow_hyphen_values = true,
            value_name = "S,W,N,E",
            help = "Keep places inside south,west,north,east (or \"idf\")"
        )]
        bbox: Option<String>,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    #[command(about = "List catalog places around a point")]
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value_t = 1.0)]
        radius_km: f64,
        #[arg(
            long,
            allow_hyphen_values = true,
            value_name = "S,W,N,E",
            help = "Keep places inside south,west,north,east (or \"idf\")"
        )]
        bbox: Option<String>,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    #[command(about = "List the curated playlists")]
    Playlists,
    #[command(about = "Print a playlist stop by stop with an excerpt per song")]
    Playlist {
        id: String,
        #[arg(long, help = "Window preset: preview or snippet")]
        preset: Option<ExcerptPreset>,
    },
}

/// Executes one command, writing the rendered result to `out`. `input` is
/// only read by text commands invoked without `--file`.
pub fn run(
    args: RootArgs,
    config: &Config,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    let format = args.format;
    let data_path = args.data.unwrap_or_else(|| config.data_path.clone());

    let rendered = match args.command {
        Command::Highlight { place, file } => {
            let text = read_text(file.as_deref(), input)?;
            render::marked(&highlight_full(&text, &place), format)?
        }
        Command::Excerpt {
            place,
            file,
            preset,
            before,
            after,
            fallback,
        } => {
            let text = read_text(file.as_deref(), input)?;
            let base = preset.unwrap_or(config.excerpt_preset).options();
            let opts = ExcerptOptions::new(
                before.unwrap_or(base.radius_before),
                after.unwrap_or(base.radius_after),
                fallback.unwrap_or(base.fallback_len),
            );
            render::marked(&excerpt(&text, &place, &opts), format)?
        }
        Command::Mentions {
            place,
            artist,
            style,
            decade,
            language,
            preset,
        } => {
            let decade = decade
                .as_deref()
                .map(str::parse::<Decade>)
                .transpose()
                .wrap_err("invalid --decade")?;
            let filter = SongFilter {
                artist,
                style,
                decade,
                language,
            };
            let opts = preset.unwrap_or(config.excerpt_preset).options();

            let catalog = load_catalog(&data_path)?;
            let found = catalog.mentions(&place, &filter, &opts);
            if found.is_empty() {
                tracing::info!("No song mentions {:?}", place);
                hint_suggestions(&catalog, &place, format);
            }
            render::mentions(&found, format)?
        }
        Command::Lyrics { song_id, place } => {
            let catalog = load_catalog(&data_path)?;
            let lyrics = catalog
                .lyrics_for(&song_id, &place)
                .ok_or_else(|| eyre::eyre!("song not found: {song_id}"))?;
            render::marked(&lyrics, format)?
        }
        Command::Places { query, bbox, limit } => {
            let bbox = parse_bbox(bbox.as_deref())?;
            let catalog = load_catalog(&data_path)?;
            let found = match (query, bbox) {
                (Some(query), bbox) => {
                    // Clip before truncating so the limit counts places inside the box.
                    let mut found = catalog.search_places(&query, usize::MAX);
                    if let Some(bbox) = bbox {
                        found.retain(|p| bbox.contains(p.coordinates()));
                    }
                    found.truncate(limit.max(1));
                    if found.is_empty() {
                        hint_suggestions(&catalog, &query, format);
                    }
                    found
                }
                (None, Some(bbox)) => {
                    let mut found = catalog.within(&bbox);
                    found.truncate(limit.max(1));
                    found
                }
                (None, None) => return Err(eyre::eyre!("give a query or --bbox")),
            };
            render::places(&found, format)?
        }
        Command::Nearby {
            lat,
            lon,
            radius_km,
            bbox,
            limit,
        } => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(eyre::eyre!("coordinates out of range: {lat}, {lon}"));
            }
            let bbox = parse_bbox(bbox.as_deref())?;
            let catalog = load_catalog(&data_path)?;
            let mut found = catalog.nearby(Coordinates::new(lat, lon), radius_km, usize::MAX);
            if let Some(bbox) = bbox {
                found.retain(|hit| bbox.contains(hit.place.coordinates()));
            }
            found.truncate(limit.max(1));
            render::nearby(&found, format)?
        }
        Command::Playlists => {
            let catalog = load_catalog(&data_path)?;
            render::playlists(catalog.playlists(), format)?
        }
        Command::Playlist { id, preset } => {
            let opts = preset.unwrap_or(config.excerpt_preset).options();
            let catalog = load_catalog(&data_path)?;
            let playlist = catalog.playlist(&id, &opts)?;
            render::playlist(&playlist, format)?
        }
    };

    out.write_all(rendered.as_bytes()).wrap_err("write output")?;
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        out.write_all(b"\n").wrap_err("write output")?;
    }
    Ok(())
}

fn read_text(file: Option<&Path>, input: &mut dyn Read) -> eyre::Result<String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            input
                .read_to_string(&mut text)
                .wrap_err("failed to read stdin")?;
            text
        }
    };
    // A byte order mark is not whitespace to the normalizer.
    match text.strip_prefix('\u{FEFF}') {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(text),
    }
}

fn parse_bbox(raw: Option<&str>) -> eyre::Result<Option<BoundingBox>> {
    raw.map(str::parse::<BoundingBox>)
        .transpose()
        .wrap_err("invalid --bbox")
}

fn load_catalog(path: &Path) -> eyre::Result<Catalog> {
    let (catalog, _loaded) =
        Catalog::load(path).wrap_err_with(|| format!("failed to load catalog {:?}", path))?;
    Ok(catalog)
}

fn hint_suggestions(catalog: &Catalog, query: &str, format: RenderFormat) {
    if format == RenderFormat::Json {
        return;
    }
    let suggestions = catalog.suggest_places(query, 3);
    if !suggestions.is_empty() {
        eprintln!("Did you mean: {}?", suggestions.join(", "));
    }
}
