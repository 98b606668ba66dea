//! Cache manager for persisting API responses to disk
//!
//! Stores the raw JSON text of API responses in an XDG-compliant cache
//! directory. Keys are hierarchical: a fixed namespace, a slug of the API
//! base URL, then one path component per endpoint segment with `.json`
//! appended to the last. Freshness is judged from file modification age.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use log::debug;

/// Namespace directory under which all API cache entries live
const CACHE_NAMESPACE: &str = "github-api";

/// Deterministic hierarchical identifier for a cached response
///
/// Derived from the API base URL and a normalized endpoint path. The same
/// endpoint always maps to the same on-disk location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    segments: Vec<String>,
}

impl CacheKey {
    /// Derives the cache key for an endpoint on the given API base URL
    ///
    /// The key is `<namespace>/<url-slug>/<endpoint segments...>` with
    /// `.json` appended to the final segment.
    pub fn for_endpoint(api_url: &str, endpoint: &str) -> Self {
        let mut segments = vec![CACHE_NAMESPACE.to_string(), slugify(api_url)];
        segments.extend(
            format!("{}.json", endpoint)
                .split('/')
                .map(str::to_string),
        );
        Self { segments }
    }

    /// Returns the key's path components in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// Replaces every run of characters outside `[0-9a-z_]` with a single dash
fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_dash = false;
    for c in input.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            slug.push(c);
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    slug
}

/// Manages reading and writing cached response bodies to disk
///
/// The cache manager stores each response as a JSON text file in an
/// XDG-compliant cache directory (`~/.cache/hubq/` on Linux). Entries older
/// than the caller's TTL are treated as absent; the caller is expected to
/// refresh them with a live request and write the result back.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory under which cache entries are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g. no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "hubq")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager rooted at a custom directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the file path backing the given key
    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        let mut path = self.cache_dir.clone();
        for segment in key.segments() {
            path.push(segment);
        }
        path
    }

    /// Reads the raw cached text for a key if it exists and is fresh
    ///
    /// An entry is fresh when its file modification age is strictly less
    /// than `max_age_secs`. Missing, stale, or unreadable entries all
    /// return `None`.
    pub fn read(&self, key: &CacheKey, max_age_secs: u64) -> Option<String> {
        let path = self.entry_path(key);
        let modified = fs::metadata(&path).ok()?.modified().ok()?;
        let age = modified.elapsed().ok()?;
        if age >= Duration::from_secs(max_age_secs) {
            debug!(
                "cache entry at {} from {} is stale",
                path.display(),
                DateTime::<Utc>::from(modified).format("%Y-%m-%d %H:%M:%S")
            );
            return None;
        }
        fs::read_to_string(&path).ok()
    }

    /// Writes raw text under a key, overwriting any existing entry
    ///
    /// Parent directories are created as needed.
    pub fn write(&self, key: &CacheKey, contents: &str) -> std::io::Result<()> {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}
