use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::harvest::{IconCandidate, IconSource};
use crate::parsers::normalize_name;

/// Icons guessed from item ids and a list of URL templates
pub struct ProbeIconSource {
    ids: Vec<String>,
    patterns: Vec<String>,
}

impl ProbeIconSource {
    pub fn new(ids: Vec<String>, patterns: Vec<String>) -> Self {
        Self { ids, patterns }
    }

    /// Build ids from display names, dropping duplicates and empty slugs
    pub fn from_names<'a, I>(names: I, patterns: Vec<String>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ids: Vec<String> = Vec::new();
        for id in names.into_iter().map(normalize_name) {
            if !id.is_empty() && !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self::new(ids, patterns)
    }

    pub fn candidates(&self) -> Vec<IconCandidate> {
        self.ids
            .iter()
            .map(|id| IconCandidate {
                key: id.clone(),
                file_name: format!("{}.png", id),
                urls: self
                    .patterns
                    .iter()
                    .map(|pattern| pattern.replace("{}", id))
                    .collect(),
            })
            .collect()
    }
}

#[async_trait]
impl IconSource for ProbeIconSource {
    async fn resolve(&self, _client: &Client) -> Result<Vec<IconCandidate>> {
        Ok(self.candidates())
    }

    fn label(&self) -> &str {
        "url patterns"
    }
}
