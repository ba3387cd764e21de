// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::config::ScrapeConfig;

pub mod icons;
pub mod memory;

pub use icons::{download_icon, icon_filename, with_width, IconOutcome};
pub use memory::MemoryFetcher;

/// Blocking network access used by the pipeline. One call, one request,
/// no retries.
pub trait Fetch {
    fn get_text(&self, url: &Url) -> Result<String>;
    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

/// `Fetch` over a blocking reqwest client with a browser-like user agent
/// and a fixed per-request timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get_text(&self, url: &Url) -> Result<String> {
        debug!("Fetching text from {}", url);
        self.client
            .get(url.clone())
            .send()
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .with_context(|| format!("Reading text from {}", url))
    }

    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("Fetching bytes from {}", url);
        let bytes = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .bytes()
            .with_context(|| format!("Reading body from {}", url))?;
        Ok(bytes.to_vec())
    }
}
