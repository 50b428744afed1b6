use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Separator between the endpoint and each `key=value` pair of a fingerprint.
const FINGERPRINT_SEPARATOR: &str = "_";

/// Build the cache key of a request: the endpoint followed by every `key=value` pair,
/// pairs sorted by their joined form, all joined with `_`.
///
/// The result does not depend on the order of `params`, e.g.
/// `https://api.twitter.com/1.1/search/tweets.json_count=100_q=#rust`.
pub fn fingerprint<K, V>(endpoint: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect();
    pairs.sort();

    let mut key = endpoint.to_string();
    for pair in pairs {
        key.push_str(FINGERPRINT_SEPARATOR);
        key.push_str(&pair);
    }
    key
}

/// Where a response returned by [`CacheStore::fetch_with_cache`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Cache,
    Network,
}

/// How the backing file was found when loading a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { entries: usize },
    /// No cache file yet.
    Absent,
    /// The file exists but could not be read or parsed. The store starts empty.
    Corrupt(String),
}

/// Performs the actual request on a cache miss.
#[async_trait]
pub trait Fetch {
    async fn fetch(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value>;
}

#[async_trait]
impl Fetch for search_client::SearchClient {
    async fn fetch(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        Ok(self.search(endpoint, params).await?)
    }
}

/// Raw response bodies keyed by request fingerprint, backed by a single JSON file.
/// The whole file is rewritten after every insertion.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl CacheStore {
    /// An empty store that will be written to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: HashMap::new(),
        }
    }

    /// Load the store from `path`. A missing or unreadable file never fails the load; it yields an empty
    /// store and the returned status tells which case happened.
    pub fn load(path: impl Into<PathBuf>) -> (Self, LoadStatus) {
        let mut store = Self::new(path);
        let status = match std::fs::read_to_string(&store.path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LoadStatus::Absent,
            Err(e) => LoadStatus::Corrupt(e.to_string()),
            Ok(content) => match serde_json::from_str::<HashMap<String, Value>>(&content) {
                Ok(entries) => {
                    store.entries = entries;
                    LoadStatus::Loaded {
                        entries: store.entries.len(),
                    }
                }
                Err(e) => LoadStatus::Corrupt(e.to_string()),
            },
        };

        match &status {
            LoadStatus::Loaded { entries } => {
                tracing::info!("Loaded {} cached responses from {}", entries, store.path.display())
            }
            LoadStatus::Absent => tracing::info!("No cache file at {}, starting empty", store.path.display()),
            LoadStatus::Corrupt(reason) => tracing::warn!(
                "Ignoring unreadable cache file {}: {}",
                store.path.display(),
                reason
            ),
        }
        (store, status)
    }

    pub fn get(&self, fingerprint: &str) -> Option<&Value> {
        self.entries.get(fingerprint)
    }

    /// Insert an entry and rewrite the backing file. A failed write is logged and otherwise ignored,
    /// the entry stays available in memory.
    pub fn put_and_flush(&mut self, fingerprint: String, entry: Value) {
        self.entries.insert(fingerprint, entry);
        if let Err(e) = self.flush() {
            tracing::warn!("Cannot write cache file {}: {}", self.path.display(), e);
        }
    }

    /// Serialize the whole mapping to the backing file, overwriting it.
    pub fn flush(&self) -> Result<()> {
        let content = serde_json::to_string(&self.entries)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!("Wrote {} cached responses to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    /// Return the cached response of a request, or fetch it with `fetcher` and store it.
    /// Fetch errors are returned as is and nothing is stored.
    pub async fn fetch_with_cache<F>(
        &mut self,
        fetcher: &F,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<(Value, CacheSource)>
    where
        F: Fetch + ?Sized,
    {
        let key = fingerprint(endpoint, params);
        if let Some(entry) = self.get(&key) {
            tracing::info!("fetching cached data");
            return Ok((entry.clone(), CacheSource::Cache));
        }

        tracing::info!("making new request");
        let entry = fetcher.fetch(endpoint, params).await?;
        self.put_and_flush(key, entry.clone());
        Ok((entry, CacheSource::Network))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
