//! Bounded, stats-tracking cache used to share `Arc<IRI>` instances across
//! repeated entity construction within one ontology load.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// A size-bounded concurrent cache with hit/miss/eviction counters.
///
/// Eviction is not LRU-precise: once `max_size` is reached, an arbitrary
/// existing entry is dropped to make room. The cache exists to cut down on
/// repeated allocation, not to guarantee optimal retention.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    entries: DashMap<K, V>,
    max_size: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_size,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.entries.get(key).map(|v| v.clone());
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    pub fn insert(&self, key: K, value: V) {
        if self.entries.len() >= self.max_size && !self.entries.contains_key(&key) {
            if let Some(evict_key) = self.entries.iter().next().map(|e| e.key().clone()) {
                self.entries.remove(&evict_key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_and_misses() {
        let cache: BoundedCache<String, u32> = BoundedCache::new(8);
        assert_eq!(cache.get(&"a".to_string()), None);
        cache.insert("a".to_string(), 1);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn evicts_when_full() {
        let cache: BoundedCache<u32, u32> = BoundedCache::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }
}
