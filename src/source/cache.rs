// Time-boxed cache for fetched tables

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use std::collections::HashMap;
use std::hash::Hash;

/// How long a fetched table stays fresh unless refreshed by hand
pub const DEFAULT_TTL_SECS: i64 = 300;

struct Entry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

/// Most recent successful fetch per key, valid for `ttl`.
///
/// Failed fetches are never stored and never evict an existing entry.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Utc::now)
    }

    /// Cache driven by a caller-supplied clock (tests)
    pub fn with_clock<F>(ttl: Duration, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + 'static,
    {
        TtlCache {
            ttl,
            entries: HashMap::new(),
            clock: Box::new(clock),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh cached value, or the result of `fetch` (stored on success).
    pub fn get_or_fetch<E, F>(&mut self, key: &K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let now = (self.clock)();
        if let Some(entry) = self.entries.get(key) {
            if now - entry.fetched_at < self.ttl {
                debug!("Cache hit for {:?}", key);
                return Ok(entry.value.clone());
            }
            info!("Cache entry for {:?} expired", key);
        }

        let value = fetch()?;
        self.entries.insert(
            key.clone(),
            Entry {
                value: value.clone(),
                fetched_at: now,
            },
        );
        Ok(value)
    }

    /// When the cached value for `key` was fetched, if still held
    pub fn fetched_at(&self, key: &K) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|e| e.fetched_at)
    }

    pub fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
    }

    pub fn invalidate_all(&mut self) {
        info!("Cache cleared");
        self.entries.clear();
    }
}
