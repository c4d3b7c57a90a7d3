//! In-memory TTL cache for fetched API responses
//!
//! Provides a `TtlCache` that stores values under string keys with the time
//! they were stored, serving them back only while they are younger than the
//! configured TTL.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A single stored value with the time it was recorded
#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    stored_at: Instant,
}

/// Keyed in-memory store with a fixed time-to-live
///
/// One entry is kept per key; a `set` for an existing key overwrites the
/// prior entry and refreshes its timestamp. There is no eviction and no
/// capacity bound beyond the natural one-entry-per-key rule. A TTL of zero
/// disables the cache: `get` always misses, while `set` still records the
/// value so the two operations stay symmetric.
///
/// The cache itself never fails; an absent or expired entry is simply a miss.
/// It is not internally synchronized, so concurrent callers must serialize
/// access themselves.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: HashMap<String, Entry<T>>,
}

impl<T: Clone> TtlCache<T> {
    /// Creates an empty cache with the given TTL
    ///
    /// A `ttl` of `Duration::ZERO` disables serving from the cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the configured TTL
    #[allow(dead_code)]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value for `key` if it is still fresh
    ///
    /// Misses when the key is absent, when the entry is older than the TTL,
    /// or when the TTL is zero.
    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, Instant::now())
    }

    /// Stores `value` under `key` with the current timestamp
    ///
    /// Unconditionally overwrites any prior entry. Returns the value
    /// unchanged so a fetch-then-cache expression can pass it straight
    /// through to the caller.
    pub fn set(&mut self, key: &str, value: T) -> T {
        self.set_at(key, value, Instant::now())
    }

    /// `get` with an explicit notion of "now", for deterministic tests
    fn get_at(&self, key: &str, now: Instant) -> Option<T> {
        if self.ttl.is_zero() {
            return None;
        }
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) <= self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// `set` with an explicit notion of "now", for deterministic tests
    fn set_at(&mut self, key: &str, value: T, now: Instant) -> T {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                stored_at: now,
            },
        );
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_get_returns_value_immediately_after_set() {
        let mut cache = TtlCache::new(seconds(120));
        cache.set("north", vec![1u8, 2, 3]);

        assert_eq!(cache.get("north"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let cache: TtlCache<String> = TtlCache::new(seconds(120));

        assert!(cache.get("nonexistent").is_none());
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let mut cache = TtlCache::new(seconds(120));
        let start = Instant::now();
        cache.set_at("forecast", "kp".to_string(), start);

        // Still fresh exactly at the TTL boundary
        assert_eq!(
            cache.get_at("forecast", start + seconds(120)),
            Some("kp".to_string())
        );
        // Stale one second past it
        assert!(cache.get_at("forecast", start + seconds(121)).is_none());
    }

    #[test]
    fn test_zero_ttl_always_misses() {
        let mut cache = TtlCache::new(Duration::ZERO);
        let start = Instant::now();
        cache.set_at("json", 42i64, start);

        assert!(cache.get_at("json", start).is_none());
        assert!(cache.get_at("json", start + seconds(1)).is_none());
    }

    #[test]
    fn test_set_overwrites_existing_entry() {
        let mut cache = TtlCache::new(seconds(120));
        cache.set("key", "first".to_string());
        cache.set("key", "second".to_string());

        assert_eq!(cache.get("key"), Some("second".to_string()));
    }

    #[test]
    fn test_set_refreshes_timestamp() {
        let mut cache = TtlCache::new(seconds(60));
        let start = Instant::now();
        cache.set_at("key", 1, start);
        cache.set_at("key", 2, start + seconds(50));

        // 70s after the first set but only 20s after the refresh
        assert_eq!(cache.get_at("key", start + seconds(70)), Some(2));
    }

    #[test]
    fn test_set_returns_value_unchanged() {
        let mut cache = TtlCache::new(seconds(120));

        let returned = cache.set("key", vec![9u8, 8, 7]);

        assert_eq!(returned, vec![9, 8, 7]);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = TtlCache::new(seconds(120));
        cache.set("north", 1);
        cache.set("south", 2);

        assert_eq!(cache.get("north"), Some(1));
        assert_eq!(cache.get("south"), Some(2));
    }
}
