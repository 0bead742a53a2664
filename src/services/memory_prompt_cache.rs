use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::ports::{CacheError, PromptCache};

pub const DEFAULT_SWEEP_THRESHOLD: usize = 1000;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    /// `None` when `now + ttl` does not fit in an `Instant`.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Process-local prompt cache.
///
/// Expired entries are dropped lazily when read, and all at once whenever a
/// write leaves more than `sweep_threshold` entries in the store. Live entries
/// are never evicted, so the store grows with the number of distinct keys
/// written within one TTL.
#[derive(Debug, Clone)]
pub struct InMemoryPromptCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    sweep_threshold: usize,
}

impl Default for InMemoryPromptCache {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_THRESHOLD)
    }
}

impl InMemoryPromptCache {
    pub fn new(sweep_threshold: usize) -> Self {
        Self { entries: Arc::new(Mutex::new(HashMap::new())), sweep_threshold }
    }

    /// Number of stored entries, expired ones included until they are swept.
    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, CacheEntry>>, CacheError> {
        self.entries.lock().map_err(|_| CacheError::Poisoned)
    }
}

impl PromptCache for InMemoryPromptCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.lock()?;
        let now = Instant::now();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.lock()?;
        let now = Instant::now();
        entries.insert(key.to_string(), CacheEntry { value, expires_at: now.checked_add(ttl) });

        if entries.len() > self.sweep_threshold {
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now));
            debug!(removed = before - entries.len(), remaining = entries.len(), "swept prompt cache");
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn invalidate_by_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.lock()?.clear();
        Ok(())
    }
}
