//! Configuration file schema for textgauge.
//!
//! A config names the lexicon, stopword and pronunciation sources and,
//! optionally, a list of documents to analyze. Relative paths resolve
//! against the directory holding the config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["textgauge.yaml", ".textgauge.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub lexicons: LexiconPaths,
    /// Directory of `*.txt` stopword sources
    #[serde(default)]
    pub stopwords: Option<PathBuf>,
    /// CMU-format pronunciation dictionary
    #[serde(default)]
    pub pronunciations: Option<PathBuf>,
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Sentiment word list locations.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LexiconPaths {
    #[serde(default)]
    pub positive: Option<PathBuf>,
    #[serde(default)]
    pub negative: Option<PathBuf>,
}

/// A document listed in the config, fetched from `url` or read from `path`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DocumentEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Prepended to the body, separated by a blank line
    #[serde(default)]
    pub title: Option<String>,
}

/// HTTP fetch settings for URL documents.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Request timeout in milliseconds (default: 10000)
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Maximum concurrent requests (default: 8)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// How long to keep fetched documents in the cache, in hours; 0 disables (default: 24)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_hours: u32,
}

fn default_timeout() -> u64 {
    10_000
}

fn default_concurrency() -> usize {
    8
}

fn default_cache_ttl() -> u32 {
    24
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout(),
            concurrency: default_concurrency(),
            cache_ttl_hours: default_cache_ttl(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file, resolving relative paths against its directory.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Make every relative source path relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };

        resolve(&mut self.lexicons.positive);
        resolve(&mut self.lexicons.negative);
        resolve(&mut self.stopwords);
        resolve(&mut self.pronunciations);
        for doc in &mut self.documents {
            resolve(&mut doc.path);
        }
    }
}

/// Discover a config file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.fetch.concurrency == 0 {
        anyhow::bail!("fetch.concurrency must be at least 1");
    }

    for (i, doc) in config.documents.iter().enumerate() {
        match (&doc.url, &doc.path) {
            (Some(_), Some(_)) => {
                anyhow::bail!("document #{} sets both url and path", i + 1)
            }
            (None, None) => anyhow::bail!("document #{} needs a url or a path", i + 1),
            (Some(url), None) => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    anyhow::bail!("document #{} has unsupported url {:?}", i + 1, url);
                }
            }
            (None, Some(_)) => {}
        }

        if doc.id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            anyhow::bail!("document #{} has an empty id", i + 1);
        }
    }

    Ok(())
}
