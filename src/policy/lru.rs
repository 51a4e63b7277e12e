//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key/value cache that evicts the entry touched least
//! recently by `put` or `get`.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                           │
//!   │                                                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, Entry<V>>                                  │   │
//!   │   │                                                          │   │
//!   │   │  ┌─────────┬───────────────────────────────────┐         │   │
//!   │   │  │   Key   │  Entry { value, node }            │         │   │
//!   │   │  ├─────────┼───────────────────────────────────┤         │   │
//!   │   │  │  key_1  │  { v1, ─────────────────────────┐ │         │   │
//!   │   │  │  key_2  │  { v2, ───────────────────┐     │ │         │   │
//!   │   │  │  key_3  │  { v3, ─────────────┐     │     │ │         │   │
//!   │   │  └─────────┴─────────────────────┼─────┼─────┼─┘         │   │
//!   │   └──────────────────────────────────┼─────┼─────┼───────────┘   │
//!   │                                      │     │     │               │
//!   │   ┌──────────────────────────────────┼─────┼─────┼───────────┐   │
//!   │   │  LinkedList<K> (recency order)   ▼     ▼     ▼           │   │
//!   │   │                                                          │   │
//!   │   │  head ──► [key_3] ◄──► [key_2] ◄──► [key_1] ◄── tail     │   │
//!   │   │   (MRU)                                     (LRU)        │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index and the list always hold the same key set. Each entry keeps the
//! [`NodeHandle`] of its key's list node so promotion is a handle relink, not
//! a search.
//!
//! ## Operations Flow
//!
//! ```text
//!   PUT new key (cache full), capacity = 3
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!
//!   put(D):
//!     1. Evict [C] from the tail and drop its index entry
//!     2. Push [D] at head, index D -> (value, handle)
//!
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   GET existing key
//!
//!   get(B):
//!     1. Index lookup: O(1)
//!     2. move_to_front(handle): O(1)
//!
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! Every touch moves a key to the head, so recency order is total.
//!
//! ## Methods
//!
//! | Method             | Complexity | Description                               |
//! |--------------------|------------|-------------------------------------------|
//! | `try_new(cap)`     | O(1)       | Create cache; `InvalidCapacity` on 0      |
//! | `put(k, v)`        | O(1)*      | Insert or update, may evict LRU first     |
//! | `get(&k)`          | O(1)       | Get value, moves to MRU position          |
//! | `peek(&k)`         | O(1)       | Get value without affecting order         |
//! | `contains(&k)`     | O(1)       | Check if key exists                       |
//! | `remove(&k)`       | O(1)       | Remove entry by key                       |
//! | `pop_lru()`        | O(1)       | Remove and return least recently used     |
//! | `peek_lru()`       | O(1)       | Peek at LRU entry without removing        |
//! | `touch(&k)`        | O(1)       | Move to MRU without returning value       |
//! | `recency_rank(&k)` | O(n)       | Position in recency order (0 = MRU)       |
//! | `clear()`          | O(n)       | Remove all entries, keep capacity         |
//!
//! ## Thread Safety
//!
//! Not synchronized. Wrap in one lock per instance for shared use.
//!
//! ## Example Usage
//!
//! ```
//! use nodekit::error::CacheError;
//! use nodekit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! assert_eq!(cache.get(&1), Ok(&"one")); // 1 is now MRU
//!
//! cache.put(3, "three"); // evicts 2
//! assert_eq!(cache.get(&2), Err(CacheError::KeyNotFound));
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![3, 1]);
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::linked_list::{LinkedList, NodeHandle};
use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
    PeekMetricsReadRecorder,
};
use crate::traits::{CoreCache, MutableCache};

/// Index entry: the value plus the handle of the key's recency node.
#[derive(Debug)]
struct Entry<V> {
    value: V,
    node: NodeHandle,
}

/// Fixed-capacity LRU cache: hash index + recency-ordered [`LinkedList`].
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, Entry<V>>,
    order: LinkedList<K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use [`try_new`](Self::try_new) for
    /// user-supplied capacities.
    ///
    /// # Example
    /// ```
    /// use nodekit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Fails fast with [`ConfigError::InvalidCapacity`] when `capacity` is 0;
    /// the capacity is never clamped.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { requested: capacity });
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: LinkedList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Inserts or updates `key` and marks it most recently used.
    ///
    /// Returns the previous value when `key` was already present. When the
    /// cache is full and `key` is new, the least recently used entry is evicted
    /// before the insert.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(entry) = self.index.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();

            let previous = std::mem::replace(&mut entry.value, value);
            let moved = self.order.move_to_front(entry.node);
            debug_assert!(moved.is_ok(), "indexed node must be live: {:?}", moved);
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.index.len() >= self.capacity && self.evict_lru().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        let node = self.order.push_front(key.clone());
        self.index.insert(key, Entry { value, node });

        #[cfg(debug_assertions)]
        self.debug_validate_sizes();

        None
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        let entry = match self.index.get(key) {
            Some(entry) => entry,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return Err(CacheError::KeyNotFound);
            },
        };

        self.order.move_to_front(entry.node)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        Ok(&entry.value)
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let value = self.index.get(key).map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_peek_found();
        }

        value
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.index.remove(key)?;
        let unlinked = self.order.remove(entry.node);
        debug_assert!(unlinked.is_ok(), "indexed node must be live: {:?}", unlinked.as_ref().err());
        Some(entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let evicted = self.evict_lru()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some(evicted)
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let key = self.order.back()?;
        self.index.get(key).map(|entry| (key, &entry.value))
    }

    /// Marks `key` most recently used. Returns `false` if absent.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(entry) = self.index.get(key) else {
            return false;
        };
        if self.order.move_to_front(entry.node).is_err() {
            return false;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Returns the position of `key` in recency order (0 = MRU). O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let target = self.index.get(key)?.node;
        let rank = self.order.iter_handles().position(|handle| {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();
            handle == target
        });

        #[cfg(feature = "metrics")]
        if rank.is_some() {
            self.metrics.record_recency_rank_found();
        }

        rank
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry. Capacity is preserved.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.order.clear();
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter()
    }

    /// Entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.index.get(key).map(|entry| (key, &entry.value)))
    }

    /// Verifies that the index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_invariants()?;
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} entries, recency list has {}",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, entry) in &self.index {
            if self.order.get(entry.node) != Some(key) {
                return Err(InvariantError::new(
                    "index handle does not point at its key's node",
                ));
            }
        }
        Ok(())
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        // EmptyList here only means there is nothing to evict.
        let key = self.order.pop_back().ok()?;
        let entry = self.index.remove(&key)?;
        Some((key, entry.value))
    }

    #[cfg(debug_assertions)]
    fn debug_validate_sizes(&self) {
        debug_assert_eq!(self.index.len(), self.order.len());
        debug_assert!(self.index.len() <= self.capacity);
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            put_calls: self.metrics.put_calls,
            put_updates: self.metrics.put_updates,
            put_new: self.metrics.put_new,
            evicted_entries: self.metrics.evicted_entries,
            clear_calls: self.metrics.clear_calls,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.index.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        LruCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        LruCache::get(self, key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        LruCache::peek(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("mru", &self.order.front())
            .field("lru", &self.order.back())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
