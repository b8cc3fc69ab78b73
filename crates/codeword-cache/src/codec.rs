//! Codec trait and implementations for turning cached values into bytes.
//!
//! The cache doesn't care how values are serialized, only that something
//! implements [`Codec`]. The same codec encodes both the cached value and
//! the [`CachedValue`](crate::CachedValue) envelope a [`FileStore`](crate::FileStore)
//! writes to disk.

use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because a cache is shared across lookup tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`CacheError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CacheError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`CacheError::Decode`] if the bytes are malformed or don't
    /// match `T`, e.g. an entry written by an older build with a different
    /// shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CacheError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Cached entries stay human-readable, so an operator can inspect the
/// cache directory to see when each credential was last refreshed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CacheError> {
        serde_json::to_vec(value).map_err(CacheError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CacheError> {
        serde_json::from_slice(data).map_err(CacheError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_codec_decode_garbage_fails() {
        let result: Result<String, _> = JsonCodec.decode(b"{not json");
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_json_codec_decode_wrong_shape_fails() {
        let bytes = JsonCodec.encode(&42u32).unwrap();
        let result: Result<Vec<String>, _> = JsonCodec.decode(&bytes);
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }
}
