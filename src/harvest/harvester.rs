use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::harvest::IconCandidate;
use crate::utils::http::fetch_bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutcome {
    Downloaded { url: String },
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub downloaded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl HarvestReport {
    /// Icons present on disk after the run
    pub fn succeeded(&self) -> usize {
        self.downloaded.len() + self.skipped.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded() + self.failed.len()
    }
}

/// Downloads icons one at a time into a directory
pub struct Harvester {
    client: Client,
    out_dir: PathBuf,
    attempts: u32,
    delay: Duration,
}

impl Harvester {
    pub fn new(client: Client, out_dir: impl Into<PathBuf>, attempts: u32) -> Self {
        Self {
            client,
            out_dir: out_dir.into(),
            attempts,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Process every candidate; a failed icon never stops the run
    pub async fn run(&self, candidates: &[IconCandidate]) -> HarvestReport {
        let mut report = HarvestReport::default();

        for candidate in candidates {
            match self.harvest_one(candidate).await {
                HarvestOutcome::Downloaded { url } => {
                    info!("[OK] Downloaded: {} from {}", candidate.file_name, host_of(&url));
                    report.downloaded.push(candidate.file_name.clone());
                }
                HarvestOutcome::Skipped => {
                    info!("[SKIP] {} (already exists)", candidate.file_name);
                    report.skipped.push(candidate.file_name.clone());
                }
                HarvestOutcome::Failed => {
                    warn!("[FAIL] {}", candidate.key);
                    report.failed.push(candidate.key.clone());
                }
            }
        }

        info!(
            "Harvest finished: {}/{} present, {} downloaded, {} failed",
            report.succeeded(),
            report.total(),
            report.downloaded.len(),
            report.failed.len()
        );

        report
    }

    pub async fn harvest_one(&self, candidate: &IconCandidate) -> HarvestOutcome {
        let target = self.out_dir.join(&candidate.file_name);
        if target.exists() {
            return HarvestOutcome::Skipped;
        }

        for url in &candidate.urls {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let bytes = match fetch_bytes(&self.client, url, self.attempts).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Failed to download {}: {:#}", url, e);
                    continue;
                }
            };

            match write_icon(&target, &bytes).await {
                Ok(()) => return HarvestOutcome::Downloaded { url: url.clone() },
                Err(e) => {
                    warn!("Failed to write {}: {}", target.display(), e);
                    return HarvestOutcome::Failed;
                }
            }
        }

        HarvestOutcome::Failed
    }
}

async fn write_icon(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(target, bytes).await
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
