use std::time::Duration;

use thiserror::Error;

/// Failure of a cache backend. Callers treat these as misses.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Backend cannot be reached or refused the operation.
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    /// A writer panicked while holding the store lock.
    #[error("cache store lock poisoned")]
    Poisoned,
}

/// Port for a key/value store with per-entry expiry.
///
/// Values are serialized records; the store never interprets them.
pub trait PromptCache {
    /// Look up a live entry. Expired entries read as `None` and are removed.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Insert or replace an entry that expires after `ttl`.
    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Remove one entry if present.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Remove every entry whose key starts with `prefix`. Returns how many were removed.
    fn invalidate_by_prefix(&self, prefix: &str) -> Result<usize, CacheError>;

    /// Remove every entry.
    fn clear(&self) -> Result<(), CacheError>;
}
