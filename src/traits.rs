//! # Cache Trait Hierarchy
//!
//! Shared interface for the fixed-capacity caches in [`policy`](crate::policy)
//! so generic code can take either eviction policy.
//!
//! ```text
//!          ┌────────────────────────────────────────┐
//!          │           CoreCache<K, V>              │
//!          │                                        │
//!          │  put(&mut, K, V) → Option<V>           │
//!          │  get(&mut, &K) → Result<&V, CacheError>│
//!          │  peek(&, &K) → Option<&V>              │
//!          │  contains / len / is_empty             │
//!          │  capacity / clear                      │
//!          └───────────────────┬────────────────────┘
//!                              │
//!                              ▼
//!          ┌────────────────────────────────────────┐
//!          │          MutableCache<K, V>            │
//!          │  remove(&K) → Option<V>                │
//!          └───────────────────┬────────────────────┘
//!                    ┌─────────┴─────────┐
//!                    ▼                   ▼
//!              LruCache<K, V>      LfuCache<K, V>
//! ```
//!
//! ## Thread Safety
//!
//! Implementations are **not** internally synchronized. Every mutating method
//! takes `&mut self`; wrap a cache in one `Mutex` per instance for shared use.

use crate::error::CacheError;

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use nodekit::policy::lru::LruCache;
/// use nodekit::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the previous value if it existed.
    ///
    /// A full cache evicts one entry according to its policy *before* the new
    /// entry is added, so the size never exceeds capacity.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key` and records the access with the policy.
    ///
    /// Fails with [`CacheError::KeyNotFound`] if the key is absent.
    fn get(&mut self, key: &K) -> Result<&V, CacheError>;

    /// Returns the value for `key` without recording an access.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries. Capacity is preserved.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use nodekit::policy::lfu::LfuCache;
/// use nodekit::traits::{CoreCache, MutableCache};
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LfuCache::new(100);
/// cache.put(1, "one".to_string());
/// cache.put(2, "two".to_string());
/// cache.put(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys; results are in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}
