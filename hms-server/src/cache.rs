//! Time-boxed cache for read-heavy listings.
//!
//! Entries expire after a fixed TTL and there is no invalidation-on-write:
//! a writer and a cached listing can disagree for up to the TTL. That
//! staleness window is an accepted tradeoff for the listings served here,
//! not something callers should patch around.

use std::time::{Duration, Instant};

use dashmap::DashMap;

struct Entry<T> {
    stored_at: Instant,
    value: T,
}

/// Lock-free TTL cache keyed by string.
pub struct TtlCache<T> {
    ttl: Duration,
    entries: DashMap<String, Entry<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// A fresh value, or `None` when absent or expired. Expired entries are
    /// dropped on the way out.
    pub fn get(&self, key: &str) -> Option<T> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn put(&self, key: impl Into<String>, value: T) {
        self.entries.insert(
            key.into(),
            Entry {
                stored_at: Instant::now(),
                value,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_served() {
        let cache = TtlCache::new(Duration::from_secs(600));
        cache.put("active", vec![1, 2, 3]);
        assert_eq!(cache.get("active"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_entry() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(600));
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn test_expired_entry_recomputed() {
        let cache = TtlCache::new(Duration::from_millis(1));
        cache.put("active", 1);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("active"), None);

        // A later put repopulates the slot
        cache.put("active", 2);
        assert_eq!(cache.get("active"), Some(2));
    }

    #[test]
    fn test_put_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(600));
        cache.put("k", 1);
        cache.put("k", 2);
        assert_eq!(cache.get("k"), Some(2));
    }
}
