//! Error types for the cache layer.

/// Errors that can occur while reading or writing cached entries.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The key can't be used as a storage location (empty, or would
    /// escape the cache directory).
    #[error("invalid cache key {0:?}")]
    InvalidKey(String),

    /// Reading a stored entry failed.
    #[error("reading cache entry {key:?} failed: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a refreshed entry failed.
    #[error("writing cache entry {key:?} failed: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a value failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserializing a stored value failed.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
