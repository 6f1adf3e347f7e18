use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashMap;
use tracing::{debug, info};
use url::Url;

use crate::harvest::{IconCandidate, IconSource};
use crate::parsers::normalize_name;
use crate::utils::http::fetch_text;

/// Icons referenced by `img` tags on a catalog page
pub struct PageIconSource {
    page_url: String,
    cdn_marker: String,
    attempts: u32,
}

impl PageIconSource {
    pub fn new(page_url: impl Into<String>, cdn_marker: impl Into<String>, attempts: u32) -> Self {
        Self {
            page_url: page_url.into(),
            cdn_marker: cdn_marker.into(),
            attempts,
        }
    }
}

#[async_trait]
impl IconSource for PageIconSource {
    async fn resolve(&self, client: &Client) -> Result<Vec<IconCandidate>> {
        info!("Fetching catalog page {}", self.page_url);
        let html = fetch_text(client, &self.page_url, self.attempts).await?;

        let candidates = collect_icon_links(&html, &self.page_url, &self.cdn_marker)?;
        info!("Found {} icon links on {}", candidates.len(), self.page_url);
        Ok(candidates)
    }

    fn label(&self) -> &str {
        &self.page_url
    }
}

/// Collect icon links from page HTML.
///
/// Entries are keyed by the normalized `alt` text; a repeated key keeps its
/// first position but takes the latest URL.
pub fn collect_icon_links(html: &str, page_url: &str, cdn_marker: &str) -> Result<Vec<IconCandidate>> {
    let document = Html::parse_document(html);
    let img_selector = Selector::parse("img[src]")
        .map_err(|_| anyhow::anyhow!("Failed to parse img selector"))?;
    let base = Url::parse(page_url).with_context(|| format!("Invalid page URL {}", page_url))?;

    let mut candidates: Vec<IconCandidate> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for img in document.select(&img_selector) {
        let Some(src) = img.value().attr("src") else {
            continue;
        };
        if !src.contains(cdn_marker) {
            continue;
        }

        let Ok(url) = base.join(src) else {
            debug!("Skipping unparseable icon src {}", src);
            continue;
        };
        let Some(file_name) = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
        else {
            continue;
        };

        let alt = img.value().attr("alt").unwrap_or_default();
        let mut key = normalize_name(alt);
        if key.is_empty() {
            key = normalize_name(file_name.split('.').next().unwrap_or_default());
        }
        debug!("Found: {} -> {}", alt, url);

        let candidate = IconCandidate {
            key: key.clone(),
            file_name,
            urls: vec![url.to_string()],
        };

        match positions.get(&key) {
            Some(&idx) => candidates[idx] = candidate,
            None => {
                positions.insert(key, candidates.len());
                candidates.push(candidate);
            }
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MARKER: &str = "cdn.arctracker.io/items/";

    #[test]
    fn keeps_only_cdn_icons() {
        let html = r#"
            <img src="https://cdn.arctracker.io/items/power_rod.png" alt="Power Rod">
            <img src="/logo.svg" alt="Logo">
            <img alt="No source">
            <img src="https://cdn.arctracker.io/items/dog_collar.png" alt="Dog's Collar">
        "#;

        let found = collect_icon_links(html, "https://raidercheatsheet.fun/", MARKER).unwrap();
        assert_eq!(
            found,
            vec![
                IconCandidate {
                    key: "power_rod".to_string(),
                    file_name: "power_rod.png".to_string(),
                    urls: vec!["https://cdn.arctracker.io/items/power_rod.png".to_string()],
                },
                IconCandidate {
                    key: "dogs_collar".to_string(),
                    file_name: "dog_collar.png".to_string(),
                    urls: vec!["https://cdn.arctracker.io/items/dog_collar.png".to_string()],
                },
            ]
        );
    }

    #[test]
    fn duplicate_alt_keeps_position_takes_latest_url() {
        let html = r#"
            <img src="https://cdn.arctracker.io/items/wires.png" alt="Wires">
            <img src="https://cdn.arctracker.io/items/fabric.png" alt="Fabric">
            <img src="https://cdn.arctracker.io/items/wires_v2.png" alt="Wires">
        "#;

        let found = collect_icon_links(html, "https://raidercheatsheet.fun/", MARKER).unwrap();
        let keys: Vec<_> = found.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["wires", "fabric"]);
        assert_eq!(found[0].file_name, "wires_v2.png");
    }

    #[test]
    fn missing_alt_falls_back_to_file_stem() {
        let html = r#"<img src="//cdn.arctracker.io/items/lemon.png">"#;
        let found = collect_icon_links(html, "https://raidercheatsheet.fun/", MARKER).unwrap();

        assert_eq!(found[0].key, "lemon");
        assert_eq!(found[0].urls, vec!["https://cdn.arctracker.io/items/lemon.png"]);
    }
}
