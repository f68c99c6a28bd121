//! In-process TTL cache for dashboard responses
//!
//! Memoizes the composition endpoint keyed by (farmer selector, weather
//! flag). The calculators are deterministic, so a cached hit returns the
//! same classifications a recompute would; entries expire after the
//! configured TTL and the cache can be disabled outright.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

/// TTL-bounded response memoization
pub struct ResponseCache<V> {
    enabled: bool,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(enabled: bool, ttl: Duration) -> Self {
        Self {
            enabled,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry; expired entries are treated as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        if !self.enabled {
            return None;
        }
        let entries = self.entries.read().expect("cache lock poisoned");
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store a response, replacing any previous entry and dropping entries
    /// that have already expired.
    pub fn put(&self, key: String, value: V) {
        if !self.enabled {
            return;
        }
        let mut entries = self.entries.write().expect("cache lock poisoned");
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    /// Drop every cached entry (after farmer registry mutations).
    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.clear();
    }
}

/// Cache key for a dashboard request
pub fn dashboard_key(farmer_id: Option<&str>, weather_flag: i8) -> String {
    let selector = farmer_id
        .map(|id| id.to_uppercase())
        .unwrap_or_else(|| "ALL".to_string());
    format!("dashboard:{selector}:{weather_flag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache = ResponseCache::new(true, Duration::from_secs(60));
        cache.put("dashboard:ALL:0".to_string(), 42);
        assert_eq!(cache.get("dashboard:ALL:0"), Some(42));
    }

    #[test]
    fn test_miss_when_expired() {
        let cache = ResponseCache::new(true, Duration::from_secs(0));
        cache.put("dashboard:ALL:0".to_string(), 42);
        assert_eq!(cache.get("dashboard:ALL:0"), None);
    }

    #[test]
    fn test_disabled_cache_never_hits() {
        let cache = ResponseCache::new(false, Duration::from_secs(60));
        cache.put("dashboard:ALL:0".to_string(), 42);
        assert_eq!(cache.get("dashboard:ALL:0"), None);
    }

    #[test]
    fn test_invalidate_all() {
        let cache = ResponseCache::new(true, Duration::from_secs(60));
        cache.put("dashboard:ALL:0".to_string(), 42);
        cache.invalidate_all();
        assert_eq!(cache.get("dashboard:ALL:0"), None);
    }

    #[test]
    fn test_key_shape() {
        assert_eq!(dashboard_key(None, 0), "dashboard:ALL:0");
        assert_eq!(dashboard_key(Some("f001"), -1), "dashboard:F001:-1");
    }
}
