//! Compute-or-reuse caching for slow-changing values.
//!
//! The central operation is [`TtlCache::get_or_refresh`]: return the value
//! stored under a key if it's younger than a TTL, otherwise compute a new
//! one, persist it, and return that. It is built for credentials that are
//! expensive to obtain and valid for hours.
//!
//! # Pieces
//!
//! - [`CacheStore`]: where entries live. [`FileStore`] writes one file per
//!   key with atomic replace; [`MemoryStore`] keeps them in-process.
//! - [`Codec`]: how values become bytes. [`JsonCodec`] is the default.
//! - [`CachedValue`]: a stored entry with its creation time.
//!
//! # Guarantees
//!
//! - A failed compute leaves the stored entry untouched.
//! - Concurrent refreshes of one key are serialized; the second caller
//!   sees the first caller's fresh value instead of recomputing.
//! - Readers never observe a half-written file entry.

mod codec;
mod error;
mod store;
mod ttl;

pub use codec::{Codec, JsonCodec};
pub use error::CacheError;
pub use store::{CacheStore, CachedValue, FileStore, MemoryStore};
pub use ttl::{TtlCache, DEFAULT_TTL};
