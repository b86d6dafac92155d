//! HTTP download of the earthquake feed.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// USGS summary feed of magnitude 4.5+ events over the past month.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/4.5_month.geojson";

/// GETs `url` and returns the body. Non-success statuses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid feed url {url:?}"))?,
    );

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("feed returned status {}: {}", status, body);
    }

    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Feed downloaded");
    Ok(bytes)
}
