use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base name of the optional config file looked up in the working directory
pub const CONFIG_FILE_STEM: &str = "item_scraper";

/// Prefix for environment overrides, e.g. `ITEM_SCRAPER_ICON_DIR`
pub const ENV_PREFIX: &str = "ITEM_SCRAPER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Tries per URL; 1 disables retrying
    pub fetch_attempts: u32,
    /// Pause between downloads
    pub request_delay_ms: u64,
    /// Catalog page whose `img` tags point at the icon CDN
    pub page_url: String,
    /// Substring identifying icon URLs on the catalog page
    pub cdn_marker: String,
    /// URL templates tried in order for each item id; `{}` is the id
    pub probe_patterns: Vec<String>,
    pub icon_dir: PathBuf,
    pub failed_report: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 10,
            fetch_attempts: 1,
            request_delay_ms: 0,
            page_url: "https://raidercheatsheet.fun/".to_string(),
            cdn_marker: "cdn.arctracker.io/items/".to_string(),
            probe_patterns: vec![
                "https://raidercheatsheet.fun/items/{}.png".to_string(),
                "https://raidercheatsheet.fun/items/{}.webp".to_string(),
                "https://raidercheatsheet.fun/images/items/{}.png".to_string(),
                "https://raidercheatsheet.fun/images/items/{}.webp".to_string(),
                "https://raidercheatsheet.fun/assets/items/{}.png".to_string(),
                "https://raidercheatsheet.fun/_next/static/media/{}.png".to_string(),
                "https://cdn.arctracker.io/items/{}.png".to_string(),
            ],
            icon_dir: PathBuf::from("public/items"),
            failed_report: PathBuf::from("failed_items.json"),
        }
    }
}

impl Config {
    /// Layer defaults, then the config file (explicit path, or an optional
    /// `item_scraper.*` next to the working directory), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path.to_path_buf()).required(true),
            None => config::File::with_name(CONFIG_FILE_STEM).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
