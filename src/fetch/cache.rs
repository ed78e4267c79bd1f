//! File-based cache for fetched documents.
//!
//! Bodies are stored under ~/.cache/textgauge/documents/ (platform
//! equivalent) with the fetch timestamp on the first line.

use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// In-memory + file-based cache of document bodies keyed by URL.
pub struct DocumentCache {
    memory: RwLock<HashMap<String, CacheEntry>>,
    cache_dir: Option<PathBuf>,
    ttl_hours: u32,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    timestamp: u64,
}

impl DocumentCache {
    /// Create a cache in the user cache directory.
    pub fn new(ttl_hours: u32) -> Self {
        let cache_dir = ProjectDirs::from("", "", "textgauge")
            .map(|dirs| dirs.cache_dir().join("documents"));
        Self::with_dir(cache_dir, ttl_hours)
    }

    /// Create a cache backed by `cache_dir`, or memory only when `None`.
    ///
    /// A zero TTL disables the cache and leaves the directory untouched.
    pub fn with_dir(cache_dir: Option<PathBuf>, ttl_hours: u32) -> Self {
        if let (Some(dir), true) = (&cache_dir, ttl_hours > 0) {
            if let Err(e) = fs::create_dir_all(dir) {
                log::debug!("cannot create cache dir {}: {}", dir.display(), e);
            }
        }

        Self {
            memory: RwLock::new(HashMap::new()),
            cache_dir,
            ttl_hours,
        }
    }

    fn enabled(&self) -> bool {
        self.ttl_hours > 0
    }

    /// Get a cached body if present and not expired.
    pub fn get(&self, url: &str) -> Option<String> {
        if !self.enabled() {
            return None;
        }
        let now = current_timestamp();
        let ttl_secs = u64::from(self.ttl_hours) * 3600;

        {
            let cache = self.memory.read().ok()?;
            if let Some(entry) = cache.get(url) {
                if now.saturating_sub(entry.timestamp) < ttl_secs {
                    return Some(entry.body.clone());
                }
            }
        }

        let entry = self.read_file_cache(url)?;
        if now.saturating_sub(entry.timestamp) >= ttl_secs {
            self.remove_file_cache(url);
            return None;
        }
        if let Ok(mut cache) = self.memory.write() {
            cache.insert(url.to_string(), entry.clone());
        }
        Some(entry.body)
    }

    /// Store a body in the cache.
    pub fn set(&self, url: &str, body: &str) {
        if !self.enabled() {
            return;
        }
        let entry = CacheEntry {
            body: body.to_string(),
            timestamp: current_timestamp(),
        };

        self.write_file_cache(url, &entry);
        if let Ok(mut cache) = self.memory.write() {
            cache.insert(url.to_string(), entry);
        }
    }

    fn read_file_cache(&self, url: &str) -> Option<CacheEntry> {
        let path = self.cache_file_path(url)?;
        let content = fs::read_to_string(path).ok()?;
        parse_cache_entry(&content)
    }

    fn write_file_cache(&self, url: &str, entry: &CacheEntry) {
        if let Some(path) = self.cache_file_path(url) {
            if let Err(e) = fs::write(&path, format_cache_entry(entry)) {
                log::debug!("cannot write cache file {}: {}", path.display(), e);
            }
        }
    }

    fn remove_file_cache(&self, url: &str) {
        if let Some(path) = self.cache_file_path(url) {
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("removed expired cache file {}", path.display()),
                Err(e) => log::debug!("cannot remove cache file {}: {}", path.display(), e),
            }
        }
    }

    fn cache_file_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(cache_file_name(url)))
    }
}

/// Readable prefix of the URL plus a SHA-256 prefix of the whole URL.
///
/// The hash is stable across builds, so files written by one release are
/// found by the next.
fn cache_file_name(url: &str) -> String {
    let stem: String = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(64)
        .collect();

    let digest = Sha256::digest(url.as_bytes());
    let hash: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}.cache", stem, hash)
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

fn format_cache_entry(entry: &CacheEntry) -> String {
    format!("fetched:{}\n{}", entry.timestamp, entry.body)
}

fn parse_cache_entry(content: &str) -> Option<CacheEntry> {
    let (header, body) = content.split_once('\n')?;
    let timestamp = header.strip_prefix("fetched:")?.parse().ok()?;
    Some(CacheEntry {
        body: body.to_string(),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_parse_cache_entry() {
        let entry = CacheEntry {
            body: "line one\nline two\n".to_string(),
            timestamp: 1234567890,
        };
        let parsed = parse_cache_entry(&format_cache_entry(&entry)).unwrap();
        assert_eq!(parsed.timestamp, 1234567890);
        assert_eq!(parsed.body, "line one\nline two\n");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_cache_entry("no header").is_none());
        assert!(parse_cache_entry("fetched:soon\nbody").is_none());
    }

    #[test]
    fn test_cache_file_name_is_safe() {
        let name = cache_file_name("https://example.com/a/b?x=1&y=2");
        assert!(name.starts_with("example_com_a_b_x_1_y_2-"));
        assert!(name.ends_with(".cache"));
        assert_ne!(name, cache_file_name("https://example.com/a/b?x=1&y=3"));
    }

    #[test]
    fn test_file_cache_survives_new_instance() {
        let temp = TempDir::new().unwrap();
        let dir = Some(temp.path().to_path_buf());

        DocumentCache::with_dir(dir.clone(), 24).set("https://example.com/a.txt", "body");

        let cache = DocumentCache::with_dir(dir, 24);
        assert_eq!(cache.get("https://example.com/a.txt").as_deref(), Some("body"));
        assert_eq!(cache.get("https://example.com/b.txt"), None);
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let cache = DocumentCache::with_dir(None, 0);
        cache.set("https://example.com/a.txt", "body");
        assert_eq!(cache.get("https://example.com/a.txt"), None);
    }

    #[test]
    fn test_zero_ttl_does_not_create_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("documents");

        let cache = DocumentCache::with_dir(Some(dir.clone()), 0);
        cache.set("https://example.com/a.txt", "body");
        assert!(!dir.exists());

        DocumentCache::with_dir(Some(dir.clone()), 1);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_cache_file_name_is_stable() {
        // SHA-256 of the URL starts with these bytes on every build
        assert_eq!(
            cache_file_name("https://example.com/"),
            "example_com_-0f115db062b7c0dd.cache"
        );
    }

    #[test]
    fn test_expired_file_is_removed() {
        let temp = TempDir::new().unwrap();
        let url = "https://example.com/old.txt";
        let path = temp.path().join(cache_file_name(url));
        let stale = CacheEntry {
            body: "old".to_string(),
            timestamp: current_timestamp() - 2 * 3600,
        };
        fs::write(&path, format_cache_entry(&stale)).unwrap();

        let cache = DocumentCache::with_dir(Some(temp.path().to_path_buf()), 1);
        assert_eq!(cache.get(url), None);
        assert!(!path.exists());
    }
}
