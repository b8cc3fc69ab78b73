//! The compute-or-reuse cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::{CacheError, CacheStore, CachedValue, Codec, JsonCodec};

/// Freshness window used when a caller has no reason to pick another.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A TTL cache over a [`CacheStore`].
///
/// ```text
/// get_or_refresh(key)
///     │
///     ├─ stored && age <= ttl ──→ decode, return   (no compute, no write)
///     │
///     └─ absent / stale / unreadable
///           └─→ compute() ──ok──→ encode, save, return
///                   └──err──→ return err          (stored entry untouched)
/// ```
pub struct TtlCache<S: CacheStore, C: Codec = JsonCodec> {
    store: S,
    codec: C,
    /// One async mutex per key, held across check → compute → write so two
    /// lookups refreshing the same key don't both hit the network.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: CacheStore> TtlCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_codec(store, JsonCodec)
    }
}

impl<S: CacheStore, C: Codec> TtlCache<S, C> {
    pub fn with_codec(store: S, codec: C) -> Self {
        Self {
            store,
            codec,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the value cached under `key` if it is at most `ttl` old;
    /// otherwise runs `compute`, persists its result under `key`, and
    /// returns it.
    ///
    /// An entry that can't be read or decoded is treated as absent.
    ///
    /// # Errors
    /// - whatever `compute` fails with, unchanged
    /// - [`CacheError`] (converted into `E`) if the refreshed value can't
    ///   be encoded or written
    pub async fn get_or_refresh<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let lock = self.key_lock(key).await;
        let _held = lock.lock().await;

        if let Some(value) = self.load_fresh(key, ttl).await {
            tracing::debug!(key, "cache hit");
            return Ok(value);
        }

        tracing::debug!(key, ?ttl, "cache miss, refreshing");
        let value = compute().await?;

        let payload = self.codec.encode(&value)?;
        self.store.save(&CachedValue::new(key, payload)).await?;
        Ok(value)
    }

    async fn load_fresh<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<T> {
        let entry = match self.store.load(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache entry unreadable, treating as absent");
                return None;
            }
        };

        if entry.is_stale(ttl, SystemTime::now()) {
            tracing::debug!(key, age = ?entry.age(SystemTime::now()), "cache entry stale");
            return None;
        }

        match self.codec.decode(&entry.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "cached value undecodable, treating as absent");
                None
            }
        }
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(key.to_owned()).or_default())
    }
}
