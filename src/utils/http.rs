use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::Config;

pub fn create_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .pool_max_idle_per_host(2)
        .build()?;

    Ok(client)
}

/// Delay before the second attempt; doubles on each further retry
const BACKOFF_BASE: Duration = Duration::from_secs(2);

/// GET `url` once, treating any non-success status as an error
async fn fetch_once(client: &Client, url: &str) -> Result<Response> {
    let response = client.get(url).send().await.map_err(|e| {
        error!("Request failed for {}: {}", url, e);
        anyhow::Error::from(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        anyhow::bail!("HTTP error: {}", status);
    }

    Ok(response)
}

/// GET `url` with up to `max_attempts` tries and exponential backoff.
/// With a single attempt no backoff is scheduled.
pub async fn fetch_with_retry(client: &Client, url: &str, max_attempts: u32) -> Result<Response> {
    fetch_with_backoff(client, url, max_attempts, BACKOFF_BASE).await
}

pub async fn fetch_with_backoff(
    client: &Client,
    url: &str,
    max_attempts: u32,
    base: Duration,
) -> Result<Response> {
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match fetch_once(client, url).await {
            Ok(response) => return Ok(response),
            Err(e) if attempt >= max_attempts => {
                return Err(e)
                    .context(format!("Failed to fetch {} after {} attempts", url, attempt));
            }
            Err(_) => {
                let delay = base * 2u32.pow(attempt - 1);
                attempt += 1;
                warn!("Retrying in {:?}... (attempt {}/{})", delay, attempt, max_attempts);
                if !delay.is_zero() {
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Fetch a page body as text
pub async fn fetch_text(client: &Client, url: &str, max_attempts: u32) -> Result<String> {
    let response = fetch_with_retry(client, url, max_attempts).await?;
    response
        .text()
        .await
        .with_context(|| format!("Failed to read body of {}", url))
}

/// Fetch a binary body such as an image
pub async fn fetch_bytes(client: &Client, url: &str, max_attempts: u32) -> Result<Vec<u8>> {
    let response = fetch_with_retry(client, url, max_attempts).await?;
    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read body of {}", url))?;
    Ok(bytes.to_vec())
}
