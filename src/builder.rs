//! Unified cache builder for the eviction policies.
//!
//! Capacity is the only configuration value. It is validated once, here or in
//! the policy's `try_new`, and never clamped.
//!
//! ## Example
//!
//! ```rust
//! use nodekit::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100)
//!     .try_build::<u64, String>(CachePolicy::Lru)
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Ok(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::{CacheError, ConfigError};
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, MutableCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, LRU tie-break.
    Lfu,
}

/// Policy-erased cache that forwards to the policy chosen at build time.
#[derive(Debug)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V>
where
    K: Eq + Hash + Clone,
{
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }

    /// Insert or update a key. Returns the previous value if the key existed.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.put(key, value),
            CacheInner::Lfu(lfu) => lfu.put(key, value),
        }
    }

    /// Get a value by key, recording the access.
    pub fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
        }
    }

    /// Get a value without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.peek(key),
            CacheInner::Lfu(lfu) => lfu.peek(key),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Lfu(lfu) => lfu.remove(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
        }
    }

    /// Clear all entries. Capacity is preserved.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        Cache::put(self, key, value)
    }

    fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        Cache::get(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        Cache::peek(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }

    fn clear(&mut self) {
        Cache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        Cache::remove(self, key)
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when the capacity is 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nodekit::builder::{CacheBuilder, CachePolicy};
    /// use nodekit::error::ConfigError;
    ///
    /// let lfu = CacheBuilder::new(100).try_build::<u64, String>(CachePolicy::Lfu);
    /// assert!(lfu.is_ok());
    ///
    /// let err = CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lru);
    /// assert_eq!(err.unwrap_err(), ConfigError::InvalidCapacity { requested: 0 });
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::try_new(self.capacity)?),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::try_new(self.capacity)?),
        };

        Ok(Cache { inner })
    }

    /// Like [`try_build`](Self::try_build), for capacities known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is 0.
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }
}
