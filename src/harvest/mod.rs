//! Icon harvesting: resolve where item icons live, then download the ones
//! that are not already on disk.

mod coverage;
mod harvester;
mod page;
mod probe;

pub use coverage::{check_coverage, CoverageReport, UnmatchedItem};
pub use harvester::{HarvestOutcome, HarvestReport, Harvester};
pub use page::PageIconSource;
pub use probe::ProbeIconSource;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// One icon to fetch: where it goes and the URLs to try, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCandidate {
    pub key: String,
    pub file_name: String,
    pub urls: Vec<String>,
}

#[async_trait]
pub trait IconSource: Send + Sync {
    async fn resolve(&self, client: &Client) -> Result<Vec<IconCandidate>>;
    fn label(&self) -> &str;
}
