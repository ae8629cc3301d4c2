use eyre::WrapErr;
use lyric_match::{escape_html, MarkedText};
use lyrics_catalog::{Mention, NearbyPlace, ResolvedPlaylist, ResolvedStop};
use models::{Place, Playlist, RenderFormat};

pub fn marked(text: &MarkedText, format: RenderFormat) -> eyre::Result<String> {
    Ok(match format {
        RenderFormat::Plain => text.to_plain(),
        RenderFormat::Markdown => text.to_markdown(),
        RenderFormat::Html => text.to_html(),
        RenderFormat::Json => serde_json::to_string_pretty(text).wrap_err("serialize text")?,
    })
}

pub fn mentions(items: &[Mention], format: RenderFormat) -> eyre::Result<String> {
    if format == RenderFormat::Json {
        return serde_json::to_string_pretty(items).wrap_err("serialize mentions");
    }

    let mut out = String::new();
    for m in items {
        let tag = if m.in_lyrics { "" } else { " [tag]" };
        match format {
            RenderFormat::Html => {
                out.push_str(&format!(
                    "<p class=\"mention\"><strong>{}</strong> · {}{}<br>{}</p>\n",
                    escape_html(&m.title),
                    escape_html(&m.artist),
                    tag,
                    m.excerpt.to_html()
                ));
            }
            RenderFormat::Markdown => {
                out.push_str(&format!(
                    "- *{}* · {}{}\n  > {}\n",
                    m.title,
                    m.artist,
                    tag,
                    m.excerpt.to_markdown().replace('\n', " / ")
                ));
            }
            _ => {
                out.push_str(&format!(
                    "{} · {}{} ({})\n  {}\n",
                    m.title,
                    m.artist,
                    tag,
                    m.song_id,
                    m.excerpt.to_plain().replace('\n', " / ")
                ));
            }
        }
    }
    Ok(out)
}

pub fn places(items: &[&Place], format: RenderFormat) -> eyre::Result<String> {
    if format == RenderFormat::Json {
        return serde_json::to_string_pretty(items).wrap_err("serialize places");
    }

    let mut out = String::new();
    for place in items {
        out.push_str(&place_line(place, None, format));
    }
    Ok(out)
}

pub fn nearby(items: &[NearbyPlace<'_>], format: RenderFormat) -> eyre::Result<String> {
    if format == RenderFormat::Json {
        return serde_json::to_string_pretty(items).wrap_err("serialize nearby places");
    }

    let mut out = String::new();
    for hit in items {
        out.push_str(&place_line(hit.place, Some(hit.distance_km), format));
    }
    Ok(out)
}

pub fn playlists(items: &[Playlist], format: RenderFormat) -> eyre::Result<String> {
    if format == RenderFormat::Json {
        return serde_json::to_string_pretty(items).wrap_err("serialize playlists");
    }

    let mut out = String::new();
    for p in items {
        let line = format!("{} · {} ({} stops)", p.id, p.title, p.stops.len());
        out.push_str(&match format {
            RenderFormat::Html => format!("<li>{}</li>\n", escape_html(&line)),
            RenderFormat::Markdown => format!("- {line}\n"),
            _ => format!("{line}\n"),
        });
    }
    Ok(out)
}

pub fn playlist(playlist: &ResolvedPlaylist<'_>, format: RenderFormat) -> eyre::Result<String> {
    if format == RenderFormat::Json {
        return serde_json::to_string_pretty(playlist).wrap_err("serialize playlist");
    }

    let mut out = String::new();
    match format {
        RenderFormat::Html => {
            out.push_str(&format!("<h2>{}</h2>\n", escape_html(playlist.title)));
            if let Some(description) = playlist.description {
                out.push_str(&format!("<p>{}</p>\n", escape_html(description)));
            }
            out.push_str("<ol>\n");
            for stop in &playlist.stops {
                let excerpt = stop
                    .excerpt
                    .as_ref()
                    .map(|e| format!("<br>{}", e.to_html()))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "<li class=\"stop\">{}{}</li>\n",
                    escape_html(&stop_heading(stop)),
                    excerpt
                ));
            }
            out.push_str("</ol>\n");
        }
        RenderFormat::Markdown => {
            out.push_str(&format!("## {}\n\n", playlist.title));
            if let Some(description) = playlist.description {
                out.push_str(&format!("{description}\n\n"));
            }
            for (n, stop) in playlist.stops.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", n + 1, stop_heading(stop)));
                if let Some(excerpt) = &stop.excerpt {
                    out.push_str(&format!(
                        "   > {}\n",
                        excerpt.to_markdown().replace('\n', " / ")
                    ));
                }
            }
        }
        _ => {
            out.push_str(&format!("{} ({})\n", playlist.title, playlist.id));
            if let Some(description) = playlist.description {
                out.push_str(&format!("{description}\n"));
            }
            for (n, stop) in playlist.stops.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", n + 1, stop_heading(stop)));
                if let Some(excerpt) = &stop.excerpt {
                    out.push_str(&format!(
                        "   {}\n",
                        excerpt.to_plain().replace('\n', " / ")
                    ));
                }
            }
        }
    }
    Ok(out)
}

fn stop_heading(stop: &ResolvedStop<'_>) -> String {
    let place = stop.place.map_or(stop.place_name, |p| p.name.as_str());
    match (stop.title, stop.artist) {
        (Some(title), Some(artist)) => format!("{place} · {title} · {artist}"),
        _ => format!("{place} · {} (song not in catalog)", stop.song_id),
    }
}

fn place_line(place: &Place, distance_km: Option<f64>, format: RenderFormat) -> String {
    let mut line = match &place.commune {
        Some(commune) => format!("{} ({})", place.name, commune),
        None => place.name.clone(),
    };
    if let Some(d) = distance_km {
        line.push_str(&format!(" {d:.2} km"));
    }

    match format {
        RenderFormat::Html => format!("<li>{}</li>\n", escape_html(&line)),
        RenderFormat::Markdown => format!("- {line}\n"),
        _ => format!("{line}\n"),
    }
}
