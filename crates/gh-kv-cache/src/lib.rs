//! Load-or-compute key-value cache
//!
//! This crate provides the cache collaborator used by `gh-repo-client`:
//! a `Cache` trait with load-or-compute and remove semantics, plus an
//! in-memory implementation with hit/miss statistics.
//!
//! The contract is deliberately small:
//!
//! - `load(key, compute)` returns the cached value for `key` if one
//!   exists, otherwise invokes `compute`, stores the result and returns
//!   it. A failed compute is never stored.
//! - `remove(key)` evicts the entry so the next load recomputes.
//!
//! Keys are used exactly as passed in: no normalization, no trailing-slash
//! canonicalization, case-sensitive. Callers must pass keys consistently.

use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

/// Cache collaborator trait
///
/// Implementations can be in-memory, file-backed, or anything else that
/// satisfies the load-or-compute contract. The value type is generic;
/// `Option<T>` values are legitimate entries, so "absent" answers can be
/// cached too.
pub trait Cache<V: Clone> {
    /// Return the cached value for `key`, or compute, store and return it.
    ///
    /// If `compute` fails, nothing is stored and the error propagates.
    fn load<E>(&self, key: &str, compute: impl FnOnce() -> Result<V, E>) -> Result<V, E>;

    /// Evict any cached value for `key`.
    fn remove(&self, key: &str);
}

/// Hit/miss counters for a cache instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Loads served from the cache
    pub hits: u64,
    /// Loads that had to compute
    pub misses: u64,
}

#[derive(Debug, Default)]
struct CacheState<V> {
    entries: HashMap<String, V>,
    stats: CacheStats,
}

/// In-memory cache with an optional bucket namespace
///
/// The bucket is a prefix applied to every key internally, keeping
/// unrelated data out of each other's way when a storage backend is
/// shared. It replaces the original design's global "github" cache
/// registry with an instance injected into the client.
///
/// Interior mutability via a `Mutex`, so a shared reference is enough
/// to load and evict. Lock poisoning is not recovered from; a panic
/// while holding the lock is a bug in the compute closure.
#[derive(Debug)]
pub struct MemoryCache<V> {
    bucket: Option<String>,
    state: Mutex<CacheState<V>>,
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryCache<V> {
    /// Create an empty cache with no bucket prefix
    pub fn new() -> Self {
        Self {
            bucket: None,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Create an empty cache whose keys are namespaced under `bucket`
    pub fn with_bucket(bucket: impl Into<String>) -> Self {
        let mut cache = Self::new();
        cache.bucket = Some(bucket.into());
        cache
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss counters
    pub fn stats(&self) -> CacheStats {
        self.state.lock().unwrap().stats
    }

    /// Drop all entries, keeping the statistics
    pub fn clear(&self) {
        self.state.lock().unwrap().entries.clear();
    }

    fn storage_key(&self, key: &str) -> String {
        match &self.bucket {
            Some(bucket) => format!("{}/{}", bucket, key),
            None => key.to_string(),
        }
    }
}

impl<V: Clone> Cache<V> for MemoryCache<V> {
    fn load<E>(&self, key: &str, compute: impl FnOnce() -> Result<V, E>) -> Result<V, E> {
        let storage_key = self.storage_key(key);

        {
            let mut state = self.state.lock().unwrap();
            if let Some(value) = state.entries.get(&storage_key) {
                let value = value.clone();
                state.stats.hits += 1;
                debug!("Cache HIT for key '{}'", storage_key);
                return Ok(value);
            }
            state.stats.misses += 1;
        }

        // Lock released while computing: the compute closure may block on
        // network I/O and must not hold the cache hostage.
        debug!("Cache MISS for key '{}', computing", storage_key);
        let value = compute()?;

        let mut state = self.state.lock().unwrap();
        state.entries.insert(storage_key, value.clone());
        Ok(value)
    }

    fn remove(&self, key: &str) {
        let storage_key = self.storage_key(key);
        debug!("Cache EVICT for key '{}'", storage_key);
        self.state.lock().unwrap().entries.remove(&storage_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_compute<'a>(
        counter: &'a Cell<usize>,
        value: &'a str,
    ) -> impl FnOnce() -> Result<String, String> + 'a {
        move || {
            counter.set(counter.get() + 1);
            Ok(value.to_string())
        }
    }

    #[test]
    fn load_computes_once_then_serves_from_cache() {
        let cache = MemoryCache::new();
        let calls = Cell::new(0);

        let first: Result<String, String> = cache.load("a", counting_compute(&calls, "one"));
        let second: Result<String, String> = cache.load("a", counting_compute(&calls, "two"));

        assert_eq!(first.unwrap(), "one");
        assert_eq!(second.unwrap(), "one"); // cached, second compute never ran
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn remove_forces_recompute() {
        let cache = MemoryCache::new();
        let calls = Cell::new(0);

        let _: Result<String, String> = cache.load("a", counting_compute(&calls, "one"));
        cache.remove("a");
        let after: Result<String, String> = cache.load("a", counting_compute(&calls, "two"));

        assert_eq!(after.unwrap(), "two");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn failed_compute_is_not_cached() {
        let cache: MemoryCache<String> = MemoryCache::new();
        let calls = Cell::new(0);

        let failed: Result<String, String> = cache.load("a", || {
            calls.set(calls.get() + 1);
            Err("boom".to_string())
        });
        assert_eq!(failed.unwrap_err(), "boom");
        assert!(cache.is_empty());

        let recovered: Result<String, String> = cache.load("a", counting_compute(&calls, "ok"));
        assert_eq!(recovered.unwrap(), "ok");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn none_is_a_cacheable_value() {
        let cache: MemoryCache<Option<String>> = MemoryCache::new();
        let calls = Cell::new(0);

        let first: Result<Option<String>, String> = cache.load("gone", || {
            calls.set(calls.get() + 1);
            Ok(None)
        });
        let second: Result<Option<String>, String> = cache.load("gone", || {
            calls.set(calls.get() + 1);
            Ok(Some("fresh".to_string()))
        });

        assert_eq!(first.unwrap(), None);
        assert_eq!(second.unwrap(), None); // the cached None wins
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn bucket_prefix_isolates_keys() {
        let github = MemoryCache::with_bucket("github");
        let other = MemoryCache::with_bucket("other");

        let _: Result<String, String> = github.load("README.md", || Ok("gh".to_string()));
        let from_other: Result<String, String> = other.load("README.md", || Ok("ot".to_string()));

        assert_eq!(from_other.unwrap(), "ot");
        assert_eq!(github.len(), 1);
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn keys_are_used_verbatim() {
        let cache = MemoryCache::new();

        let _: Result<String, String> = cache.load("Dir/File.md", || Ok("a".to_string()));
        // Different case and trailing slash are different keys.
        let lower: Result<String, String> = cache.load("dir/file.md", || Ok("b".to_string()));
        let slash: Result<String, String> = cache.load("Dir/File.md/", || Ok("c".to_string()));

        assert_eq!(lower.unwrap(), "b");
        assert_eq!(slash.unwrap(), "c");
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let cache = MemoryCache::new();

        let _: Result<String, String> = cache.load("a", || Ok("v".to_string()));
        let _: Result<String, String> = cache.load("a", || Ok("v".to_string()));
        let _: Result<String, String> = cache.load("b", || Ok("v".to_string()));

        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2 });
    }

    #[test]
    fn clear_drops_entries_but_keeps_stats() {
        let cache = MemoryCache::new();
        let _: Result<String, String> = cache.load("a", || Ok("v".to_string()));

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }
}
