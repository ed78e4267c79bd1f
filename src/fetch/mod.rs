//! HTTP client for documents listed by URL.
//!
//! Each URL gets a single GET with a timeout; there is no retry. Bodies are
//! used as plain text and cached on disk between runs.

mod cache;

pub use cache::DocumentCache;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::FetchError;

const USER_AGENT: &str = concat!("textgauge/", env!("CARGO_PKG_VERSION"));

/// Fetches document bodies over HTTP(S).
pub struct Fetcher {
    http: Client,
    cache: DocumentCache,
    timeout: Duration,
    concurrency: usize,
}

impl Fetcher {
    /// Create a fetcher with the user cache directory.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Self::with_cache(config, DocumentCache::new(config.cache_ttl_hours))
    }

    /// Create a fetcher with an explicit cache.
    pub fn with_cache(config: &FetchConfig, cache: DocumentCache) -> Result<Self, FetchError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            cache,
            timeout: Duration::from_millis(config.timeout_ms),
            concurrency: config.concurrency.max(1),
        })
    }

    /// Fetch one document body.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Some(body) = self.cache.get(url) {
            log::debug!("cache hit for {}", url);
            return Ok(body);
        }

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify)?;
        self.cache.set(url, &body);
        log::info!("fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }

    /// Fetch many documents concurrently, returning results in input order.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<Result<String, FetchError>> {
        stream::iter(urls)
            .map(|url| self.fetch(url))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Blocking wrapper around [`Fetcher::fetch_all`] for synchronous callers.
    pub fn fetch_all_blocking(&self, urls: &[String]) -> anyhow::Result<Vec<Result<String, FetchError>>> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(runtime.block_on(self.fetch_all(urls)))
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("textgauge/"));
        assert!(USER_AGENT.len() > "textgauge/".len());
    }

    #[test]
    fn test_cached_body_skips_network() {
        let config = FetchConfig::default();
        let cache = DocumentCache::with_dir(None, 1);
        // Unroutable address: a network attempt would fail
        let url = "http://127.0.0.1:9/article.txt";
        cache.set(url, "cached body");

        let fetcher = Fetcher::with_cache(&config, cache).unwrap();
        let results = fetcher.fetch_all_blocking(&[url.to_string()]).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_deref().unwrap(), "cached body");
    }

    #[test]
    fn test_empty_url_list() {
        let fetcher = Fetcher::with_cache(&FetchConfig::default(), DocumentCache::with_dir(None, 0))
            .unwrap();
        assert!(fetcher.fetch_all_blocking(&[]).unwrap().is_empty());
    }
}
