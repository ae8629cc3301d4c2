use std::io::Cursor;
use std::path::PathBuf;

use clap::Parser;
use ile_de_sons::cli::{run, RootArgs};
use ile_de_sons::config::Config;
use models::ExcerptPreset;

const DATA_JSON: &str = r#"{
  "songs": [
    {
      "id": "belleville",
      "title": "Belleville Rendez-vous",
      "artist": "Les Triplettes",
      "year": 2003,
      "language": "fr",
      "lyrics": "On se retrouve à Belleville, rendez-vous au métro Couronnes."
    },
    {
      "id": "menilmontant",
      "title": "Ménilmontant",
      "artist": "Charles Trenet",
      "year": 1938,
      "language": "fr",
      "lyrics": "Ménilmontant mais oui madame, c'est là que j'ai laissé mon cœur."
    }
  ],
  "places": [
    { "name": "Belleville", "commune": "Paris", "lat": 48.8720, "lon": 2.3770 },
    { "name": "Ménilmontant", "commune": "Paris", "lat": 48.8665, "lon": 2.3833 },
    { "name": "Basilique de Saint-Denis", "commune": "Saint-Denis", "lat": 48.9356, "lon": 2.3597 }
  ],
  "playlists": [
    {
      "id": "est",
      "title": "Est parisien",
      "description": "De Belleville à Ménilmontant",
      "stops": [
        { "place": "Belleville", "song_id": "belleville" },
        { "place": "menilmontant", "song_id": "menilmontant" }
      ]
    }
  ]
}"#;

struct Fixture {
    _dir: tempfile::TempDir,
    config: Config,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("data.json");
    std::fs::write(&data_path, DATA_JSON).unwrap();
    Fixture {
        config: Config {
            data_path,
            excerpt_preset: ExcerptPreset::Preview,
        },
        _dir: dir,
    }
}

fn exec(config: &Config, argv: &[&str], stdin: &str) -> eyre::Result<String> {
    let args = RootArgs::try_parse_from(std::iter::once("ile-de-sons").chain(argv.iter().copied()))?;
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    run(args, config, &mut input, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn highlight_reads_stdin() {
    let f = fixture();
    let out = exec(
        &f.config,
        &["highlight", "--place", "porte de la chapelle", "--format", "markdown"],
        "Ce soir à la Porte-de-la-Chapelle",
    )
    .unwrap();
    assert_eq!(out, "Ce soir à la **Porte-de-la-Chapelle**\n");
}

#[test]
fn highlight_reads_file() {
    let f = fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lyrics.txt");
    std::fs::write(&path, "<Pigalle> & nous").unwrap();

    let out = exec(
        &f.config,
        &[
            "highlight",
            "--place",
            "pigalle",
            "--file",
            path.to_str().unwrap(),
            "--format",
            "html",
        ],
        "",
    )
    .unwrap();
    assert_eq!(out, "&lt;<mark>Pigalle</mark>&gt; &amp; nous\n");
}

#[test]
fn leading_byte_order_mark_is_dropped() {
    let f = fixture();
    let out = exec(
        &f.config,
        &["highlight", "--place", "pigalle", "--format", "markdown"],
        "\u{FEFF}Pigalle la nuit",
    )
    .unwrap();
    assert_eq!(out, "**Pigalle** la nuit\n");
}

#[test]
fn excerpt_flags_override_preset() {
    let f = fixture();
    let text = "un deux trois Nation quatre cinq six";
    let out = exec(
        &f.config,
        &["excerpt", "--place", "nation", "--before", "6", "--after", "7"],
        text,
    )
    .unwrap();
    assert_eq!(out, "…trois Nation quatre…\n");

    let out = exec(
        &f.config,
        &["excerpt", "--place", "opera", "--fallback", "3"],
        text,
    )
    .unwrap();
    assert_eq!(out, "un …\n");
}

#[test]
fn mentions_filters_by_decade() {
    let f = fixture();
    let out = exec(&f.config, &["mentions", "menilmontant", "--decade", "30s"], "").unwrap();
    assert!(out.starts_with("Ménilmontant · Charles Trenet (menilmontant)\n"));

    let out = exec(&f.config, &["mentions", "menilmontant", "--decade", "2000"], "").unwrap();
    assert!(out.is_empty());

    assert!(exec(&f.config, &["mentions", "belleville", "--decade", "1995"], "").is_err());
}

#[test]
fn mentions_as_json() {
    let f = fixture();
    let out = exec(&f.config, &["mentions", "Belleville", "--format", "json"], "").unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["song_id"], "belleville");
    assert_eq!(json[0]["in_lyrics"], true);
}

#[test]
fn lyrics_of_unknown_song_fail() {
    let f = fixture();
    let out = exec(&f.config, &["lyrics", "menilmontant", "--place", "ménilmontant"], "").unwrap();
    assert!(out.starts_with("Ménilmontant mais oui madame"));

    assert!(exec(&f.config, &["lyrics", "nope", "--place", "x"], "").is_err());
}

#[test]
fn places_and_nearby() {
    let f = fixture();
    let out = exec(&f.config, &["places", "saint denis"], "").unwrap();
    assert_eq!(out, "Basilique de Saint-Denis (Saint-Denis)\n");

    let out = exec(
        &f.config,
        &["nearby", "--lat", "48.8720", "--lon", "2.3770", "--radius-km", "1.5"],
        "",
    )
    .unwrap();
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Belleville (Paris) 0.00 km"));
    assert!(lines[1].starts_with("Ménilmontant (Paris)"));

    assert!(exec(&f.config, &["nearby", "--lat", "120", "--lon", "2"], "").is_err());
}

#[test]
fn places_inside_bounding_box() {
    let f = fixture();
    let out = exec(&f.config, &["places", "--bbox", "48.85,2.35,48.90,2.40"], "").unwrap();
    assert_eq!(out, "Belleville (Paris)\nMénilmontant (Paris)\n");

    let out = exec(&f.config, &["places", "--bbox", "idf", "-l", "2"], "").unwrap();
    assert_eq!(out.lines().count(), 2);

    let out = exec(
        &f.config,
        &["places", "saint denis", "--bbox", "48.85,2.35,48.90,2.40"],
        "",
    )
    .unwrap();
    assert!(out.is_empty());

    let out = exec(&f.config, &["places", "--bbox", "-10,-10,10,10"], "").unwrap();
    assert!(out.is_empty());

    assert!(exec(&f.config, &["places"], "").is_err());
    assert!(exec(&f.config, &["places", "--bbox", "48.9,2.3,48.8"], "").is_err());
}

#[test]
fn nearby_clipped_to_bounding_box() {
    let f = fixture();
    let out = exec(
        &f.config,
        &[
            "nearby",
            "--lat",
            "48.8720",
            "--lon",
            "2.3770",
            "--radius-km",
            "10",
            "--bbox",
            "48.9,2.3,49.0,2.4",
        ],
        "",
    )
    .unwrap();
    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("Basilique de Saint-Denis (Saint-Denis)"));
}

#[test]
fn playlist_listing_and_detail() {
    let f = fixture();
    let out = exec(&f.config, &["playlists"], "").unwrap();
    assert_eq!(out, "est · Est parisien (2 stops)\n");

    let out = exec(&f.config, &["playlist", "est"], "").unwrap();
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Est parisien (est)");
    assert_eq!(lines[1], "De Belleville à Ménilmontant");
    assert_eq!(lines[2], "1. Belleville · Belleville Rendez-vous · Les Triplettes");
    assert_eq!(
        lines[3],
        "   On se retrouve à Belleville, rendez-vous au métro Couronnes."
    );
    assert_eq!(lines[4], "2. Ménilmontant · Ménilmontant · Charles Trenet");

    let out = exec(&f.config, &["playlist", "est", "--format", "markdown"], "").unwrap();
    assert!(out.contains("   > On se retrouve à **Belleville**, rendez-vous"));
}

#[test]
fn playlist_as_json_and_unknown_id() {
    let f = fixture();
    let out = exec(&f.config, &["playlist", "est", "--format", "json"], "").unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["id"], "est");
    assert_eq!(json["stops"][1]["place"]["name"], "Ménilmontant");
    assert_eq!(json["stops"][1]["excerpt"][0]["text"], "Ménilmontant");
    assert_eq!(json["stops"][1]["excerpt"][0]["emphasized"], true);

    let err = exec(&f.config, &["playlist", "ouest"], "").unwrap_err();
    assert!(err.to_string().contains("playlist not found: ouest"));
}

#[test]
fn data_flag_overrides_config() {
    let f = fixture();
    let missing = PathBuf::from("/nonexistent/catalog.json");
    let out = exec(
        &f.config,
        &["places", "belleville", "--data", missing.to_str().unwrap()],
        "",
    )
    .unwrap();
    assert!(out.is_empty());
}
