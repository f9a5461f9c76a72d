//! Object cache interface: a key-value store with TTL and counter arithmetic.
//!
//! Modeled on memcached-style caches: `incr`/`decr` only operate on keys
//! that are present, and expiry is the cache's business, not the caller's.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Key-value cache with TTL-bound entries and counter arithmetic.
///
/// Values are signed: a counter adjusted down before its authoritative
/// value was populated may legitimately go negative until the next refresh.
pub trait CacheStore: Send + Sync {
    /// Fetch a value, or `None` if absent or expired.
    fn get(&self, key: &str) -> Option<i64>;

    /// Store a value with a time-to-live.
    fn set(&self, key: &str, value: i64, ttl: Duration);

    /// Increment a present entry by one. Returns the new value, or `None`
    /// if the key was absent or expired (no entry is created).
    fn incr(&self, key: &str) -> Option<i64>;

    /// Decrement a present entry by one. Returns the new value, or `None`
    /// if the key was absent or expired (no entry is created).
    fn decr(&self, key: &str) -> Option<i64>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: i64,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() > at,
            None => false,
        }
    }
}

/// In-memory [`CacheStore`] with lazy expiry.
///
/// Expired entries are filtered at lookup time rather than reaped by a
/// background task.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn adjust(&self, key: &str, delta: i64) -> Option<i64> {
        let mut entry = self.entries.get_mut(key)?;
        if entry.is_expired() {
            return None;
        }
        entry.value += delta;
        Some(entry.value)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<i64> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(entry.value)
    }

    fn set(&self, key: &str, value: i64, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Some(Instant::now() + ttl),
            },
        );
    }

    fn incr(&self, key: &str) -> Option<i64> {
        self.adjust(key, 1)
    }

    fn decr(&self, key: &str) -> Option<i64> {
        self.adjust(key, -1)
    }
}
