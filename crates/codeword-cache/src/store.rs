//! Storage backends for cached entries.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{CacheError, Codec, JsonCodec};

/// Distinguishes temp files of concurrent writers within one process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

// ---------------------------------------------------------------------------
// CachedValue
// ---------------------------------------------------------------------------

/// One stored entry: an encoded value plus when it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedValue {
    pub key: String,
    pub payload: Vec<u8>,
    pub created_at: SystemTime,
}

impl CachedValue {
    /// Creates an entry stamped with the current time.
    pub fn new(key: impl Into<String>, payload: Vec<u8>) -> Self {
        Self::with_created_at(key, payload, SystemTime::now())
    }

    /// Creates an entry with an explicit creation time.
    pub fn with_created_at(
        key: impl Into<String>,
        payload: Vec<u8>,
        created_at: SystemTime,
    ) -> Self {
        Self {
            key: key.into(),
            payload,
            created_at,
        }
    }

    /// How old the entry is at `now`.
    ///
    /// A `created_at` in the future (the clock stepped backwards) counts
    /// as age zero.
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.created_at).unwrap_or(Duration::ZERO)
    }

    /// `true` once the entry's age exceeds `ttl`. An entry exactly `ttl`
    /// old is still fresh.
    pub fn is_stale(&self, ttl: Duration, now: SystemTime) -> bool {
        self.age(now) > ttl
    }
}

// ---------------------------------------------------------------------------
// CacheStore
// ---------------------------------------------------------------------------

/// Durable key → entry storage.
///
/// Implementations must make `save` atomic per key: a concurrent `load`
/// sees either the old entry or the new one, never a mix.
pub trait CacheStore: Send + Sync + 'static {
    /// Returns the entry stored under `key`, or `None` if there isn't one.
    fn load(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<CachedValue>, CacheError>> + Send;

    /// Stores `entry` under `entry.key`, replacing any previous entry.
    fn save(&self, entry: &CachedValue) -> impl Future<Output = Result<(), CacheError>> + Send;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Stores each entry as `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so a crash mid-write leaves the previous entry
/// intact. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore<C: Codec = JsonCodec> {
    dir: PathBuf,
    codec: C,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_codec(dir, JsonCodec)
    }
}

impl<C: Codec> FileStore<C> {
    pub fn with_codec(dir: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            dir: dir.into(),
            codec,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file an entry for `key` lives in.
    ///
    /// # Errors
    /// [`CacheError::InvalidKey`] for empty keys, keys starting with `.`,
    /// and keys containing path separators.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty() && !key.starts_with('.') && !key.contains(['/', '\\']);
        if !valid {
            return Err(CacheError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl<C: Codec> CacheStore for FileStore<C> {
    async fn load(&self, key: &str) -> Result<Option<CachedValue>, CacheError> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Read {
                    key: key.to_owned(),
                    source,
                });
            }
        };
        self.codec.decode(&bytes).map(Some)
    }

    async fn save(&self, entry: &CachedValue) -> Result<(), CacheError> {
        let path = self.path_for(&entry.key)?;
        let write_err = |source| CacheError::Write {
            key: entry.key.clone(),
            source,
        };

        let bytes = self.codec.encode(entry)?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(write_err)?;

        // Same directory as the target so the rename never crosses a
        // filesystem boundary.
        let tmp = self
            .dir
            .join(format!(
                ".{}.{}.{}.tmp",
                entry.key,
                std::process::id(),
                TMP_SEQ.fetch_add(1, Ordering::Relaxed)
            ));
        tokio::fs::write(&tmp, &bytes).await.map_err(write_err)?;
        if let Err(source) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(source));
        }

        tracing::debug!(key = %entry.key, path = %path.display(), "cache entry written");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Keeps entries in process memory.
///
/// Useful for short-lived deployments that shouldn't touch disk, and in
/// tests, where [`MemoryStore::write_count`] lets assertions check that a
/// cache hit performed no write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CachedValue>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns a copy of the raw entry for `key`.
    pub async fn entry(&self, key: &str) -> Option<CachedValue> {
        self.entries.lock().await.get(key).cloned()
    }
}

impl CacheStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<CachedValue>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn save(&self, entry: &CachedValue) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .await
            .insert(entry.key.clone(), entry.clone());
        Ok(())
    }
}
