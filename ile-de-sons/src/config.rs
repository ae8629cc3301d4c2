use std::path::PathBuf;

use eyre::WrapErr;
use models::ExcerptPreset;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub excerpt_preset: ExcerptPreset,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let data_path = lookup("LYRICS_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/data.json"));
        let excerpt_preset = lookup("EXCERPT_PRESET")
            .unwrap_or_else(|| "preview".to_string())
            .parse::<ExcerptPreset>()
            .wrap_err("EXCERPT_PRESET must be one of: preview, snippet")?;

        Ok(Self {
            data_path,
            excerpt_preset,
        })
    }
}
