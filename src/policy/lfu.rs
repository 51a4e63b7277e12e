//! # LFU (Least Frequently Used) Cache
//!
//! Fixed-capacity cache that evicts the key with the fewest touches. Ties at
//! the lowest frequency go to the key touched least recently.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                              │
//!   │                                                                      │
//!   │   index: FxHashMap<K, Entry { value, freq, node }>                   │
//!   │                                                                      │
//!   │   levels: LinkedList<u64>   (live frequencies, ascending)            │
//!   │                                                                      │
//!   │     head ──► [1] ◄──► [3] ◄──► [5] ◄── tail                          │
//!   │               ▲        ▲        ▲                                    │
//!   │   buckets: FxHashMap<u64, Bucket { keys, level }>                    │
//!   │                                                                      │
//!   │     freq 1:  front ──► [E] ◄──► [D] ◄── back                         │
//!   │     freq 3:  front ──► [B] ◄── back                                  │
//!   │     freq 5:  front ──► [A] ◄── back                                  │
//!   │                                                                      │
//!   │   Eviction: back of the bucket at the head level  (D above)          │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frequency Bump
//!
//! ```text
//!   get(B) with B at freq 3:
//!     1. if there is no bucket 4, link level [4] right after level [3]
//!     2. unlink B's node from bucket 3; if it empties, drop the bucket
//!        and unlink level [3]
//!     3. push B to the front of bucket 4, store the new handle
//! ```
//!
//! A new level is only ever created next to an existing one (f + 1 after f)
//! or at the head (frequency 1), so `levels` stays sorted without searching
//! and the minimum frequency is always its head. Every step is a hash lookup
//! or a handle relink.
//!
//! ## Core Operations
//!
//! | Method           | Complexity | Description                                 |
//! |------------------|------------|---------------------------------------------|
//! | `try_new(cap)`   | O(1)       | Create cache; `InvalidCapacity` on 0        |
//! | `put(k, v)`      | O(1)       | Insert at freq 1 or update and bump         |
//! | `get(&k)`        | O(1)       | Get value, increments frequency             |
//! | `peek(&k)`       | O(1)       | Get value without touching frequency        |
//! | `remove(&k)`     | O(1)       | Remove entry by key                         |
//! | `pop_lfu()`      | O(1)       | Remove and return the eviction candidate    |
//! | `peek_lfu()`     | O(1)       | Eviction candidate without removing         |
//! | `frequency(&k)`  | O(1)       | Current touch count                         |
//!
//! ## Example Usage
//!
//! ```
//! use nodekit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("hot", 1);
//! cache.put("cold", 2);
//! let _ = cache.get(&"hot");
//!
//! cache.put("new", 3); // "cold" has the lowest frequency
//! assert!(!cache.contains(&"cold"));
//! assert_eq!(cache.frequency(&"hot"), Some(2));
//! ```

use std::collections::hash_map::Entry as MapEntry;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::linked_list::{LinkedList, NodeHandle};
use crate::error::{CacheError, ConfigError, InvariantError, ListError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsRecorder, MetricsSnapshotProvider, PeekMetricsReadRecorder,
};
use crate::traits::{CoreCache, MutableCache};

#[derive(Debug)]
struct Entry<V> {
    value: V,
    freq: u64,
    node: NodeHandle,
}

/// Keys at one frequency (front = most recent) and that frequency's node in
/// the level list.
#[derive(Debug)]
struct Bucket<K> {
    keys: LinkedList<K>,
    level: NodeHandle,
}

/// Fixed-capacity LFU cache with per-frequency recency buckets.
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, Entry<V>>,
    buckets: FxHashMap<u64, Bucket<K>>,
    levels: LinkedList<u64>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a cache holding at most `capacity` entries, rejecting 0.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { requested: capacity });
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            levels: LinkedList::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        })
    }

    /// Inserts `key` at frequency 1, or replaces its value and bumps it.
    ///
    /// A new key into a full cache evicts the current [`peek_lfu`](Self::peek_lfu)
    /// entry first.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(entry) = self.index.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();

            let previous = std::mem::replace(&mut entry.value, value);
            let bumped = self.bump(&key);
            debug_assert!(bumped.is_ok(), "indexed key must bump: {:?}", bumped);
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.index.len() >= self.capacity && self.evict_lfu().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        // 1 is the smallest frequency, so its level always goes at the head
        let bucket = match self.buckets.entry(1) {
            MapEntry::Occupied(occupied) => occupied.into_mut(),
            MapEntry::Vacant(vacant) => vacant.insert(Bucket {
                keys: LinkedList::new(),
                level: self.levels.push_front(1),
            }),
        };
        let node = bucket.keys.push_front(key.clone());
        self.index.insert(
            key,
            Entry {
                value,
                freq: 1,
                node,
            },
        );
        None
    }

    /// Returns the value for `key` and increments its frequency.
    pub fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        if let Err(err) = self.bump(key) {
            #[cfg(feature = "metrics")]
            if err == CacheError::KeyNotFound {
                self.metrics.record_get_miss();
            }
            return Err(err);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.index
            .get(key)
            .map(|entry| &entry.value)
            .ok_or(CacheError::KeyNotFound)
    }

    /// Returns the value for `key` without touching its frequency.
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

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.index.remove(key)?;
        let detached = Self::detach(&mut self.buckets, &mut self.levels, entry.freq, entry.node);
        debug_assert!(detached.is_ok(), "indexed node must be live: {:?}", detached.as_ref().err());
        Some(entry.value)
    }

    /// Removes and returns the entry `put` would evict next.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let popped = self.evict_lfu()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_found();

        Some(popped)
    }

    /// Returns the entry `put` would evict next.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let min = self.levels.front()?;
        let key = self.buckets.get(min)?.keys.back()?;
        self.index.get(key).map(|entry| (key, &entry.value))
    }

    /// Touch count of `key`: 1 after insert, +1 per `get` or updating `put`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|entry| entry.freq)
    }

    /// Smallest frequency held, 0 when empty.
    pub fn min_frequency(&self) -> u64 {
        self.levels.front().copied().unwrap_or(0)
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

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.buckets.clear();
        self.levels.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.levels.check_invariants()?;
        if self.levels.len() != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "{} levels for {} buckets",
                self.levels.len(),
                self.buckets.len()
            )));
        }
        let mut previous = 0u64;
        for &freq in &self.levels {
            if freq <= previous {
                return Err(InvariantError::new(format!(
                    "level {} follows level {}",
                    freq, previous
                )));
            }
            previous = freq;
        }

        let mut held = 0usize;
        for (freq, bucket) in &self.buckets {
            if bucket.keys.is_empty() {
                return Err(InvariantError::new(format!("bucket {} is empty", freq)));
            }
            if self.levels.get(bucket.level) != Some(freq) {
                return Err(InvariantError::new(format!(
                    "bucket {} does not own its level node",
                    freq
                )));
            }
            bucket.keys.check_invariants()?;
            held += bucket.keys.len();
        }
        if held != self.index.len() {
            return Err(InvariantError::new(format!(
                "buckets hold {} keys, index has {}",
                held,
                self.index.len()
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
            let stored = self
                .buckets
                .get(&entry.freq)
                .and_then(|bucket| bucket.keys.get(entry.node));
            if stored != Some(key) {
                return Err(InvariantError::new(format!(
                    "entry at frequency {} is not linked in its bucket",
                    entry.freq
                )));
            }
        }
        Ok(())
    }

    fn bump(&mut self, key: &K) -> Result<(), CacheError> {
        let entry = self.index.get_mut(key).ok_or(CacheError::KeyNotFound)?;
        let freq = entry.freq;
        let next = freq + 1;

        // link level `next` while level `freq` is still there to anchor it
        if !self.buckets.contains_key(&next) {
            let anchor = self
                .buckets
                .get(&freq)
                .map(|bucket| bucket.level)
                .ok_or(ListError::InvalidItem)?;
            let level = self.levels.insert_after(anchor, next)?;
            self.buckets.insert(
                next,
                Bucket {
                    keys: LinkedList::new(),
                    level,
                },
            );
        }

        let owned = Self::detach(&mut self.buckets, &mut self.levels, freq, entry.node)?;
        let bucket = self.buckets.get_mut(&next).ok_or(ListError::InvalidItem)?;
        entry.node = bucket.keys.push_front(owned);
        entry.freq = next;

        #[cfg(feature = "metrics")]
        self.metrics.record_frequency_bump();

        Ok(())
    }

    /// Unlinks `node` from bucket `freq`, dropping the bucket and its level
    /// when it empties. Returns the stored key.
    fn detach(
        buckets: &mut FxHashMap<u64, Bucket<K>>,
        levels: &mut LinkedList<u64>,
        freq: u64,
        node: NodeHandle,
    ) -> Result<K, ListError> {
        let bucket = buckets.get_mut(&freq).ok_or(ListError::InvalidItem)?;
        let key = bucket.keys.remove(node)?;
        if bucket.keys.is_empty() {
            let level = bucket.level;
            buckets.remove(&freq);
            levels.remove(level)?;
        }
        Ok(key)
    }

    fn evict_lfu(&mut self) -> Option<(K, V)> {
        let freq = *self.levels.front()?;
        let bucket = self.buckets.get_mut(&freq)?;
        // EmptyList here only means there is nothing to evict.
        let key = bucket.keys.pop_back().ok()?;
        if bucket.keys.is_empty() {
            let level = bucket.level;
            self.buckets.remove(&freq);
            let dropped = self.levels.remove(level);
            debug_assert!(dropped.is_ok(), "bucket level must be live: {:?}", dropped);
        }
        let entry = self.index.remove(&key)?;
        Some((key, entry.value))
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            put_calls: self.metrics.put_calls,
            put_updates: self.metrics.put_updates,
            put_new: self.metrics.put_new,
            evicted_entries: self.metrics.evicted_entries,
            clear_calls: self.metrics.clear_calls,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            frequency_bumps: self.metrics.frequency_bumps,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            cache_len: self.index.len(),
            capacity: self.capacity,
            min_frequency: self.min_frequency(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        LfuCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        LfuCache::get(self, key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        LfuCache::peek(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    fn clear(&mut self) {
        LfuCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LfuCache::remove(self, key)
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("min_frequency", &self.min_frequency())
            .field("buckets", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_operations {
        use super::*;

        #[test]
        fn zero_capacity_is_rejected() {
            assert_eq!(
                LfuCache::<u32, u32>::try_new(0).unwrap_err(),
                ConfigError::InvalidCapacity { requested: 0 }
            );
        }

        #[test]
        fn new_key_starts_at_frequency_one() {
            let mut cache = LfuCache::new(3);
            assert_eq!(cache.put("a", 1), None);
            assert_eq!(cache.frequency(&"a"), Some(1));
            assert_eq!(cache.min_frequency(), 1);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn get_increments_frequency() {
            let mut cache = LfuCache::new(3);
            cache.put("a", 1);
            assert_eq!(cache.get(&"a"), Ok(&1));
            assert_eq!(cache.get(&"a"), Ok(&1));
            assert_eq!(cache.frequency(&"a"), Some(3));
            assert_eq!(cache.get(&"z"), Err(CacheError::KeyNotFound));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn update_replaces_value_and_bumps() {
            let mut cache = LfuCache::new(3);
            cache.put("a", 1);
            assert_eq!(cache.put("a", 10), Some(1));
            assert_eq!(cache.peek(&"a"), Some(&10));
            assert_eq!(cache.frequency(&"a"), Some(2));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn peek_does_not_bump() {
            let mut cache = LfuCache::new(2);
            cache.put(1, "one");
            assert_eq!(cache.peek(&1), Some(&"one"));
            assert_eq!(cache.frequency(&1), Some(1));
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn evicts_lowest_frequency() {
            let mut cache = LfuCache::new(3);
            cache.extend([("a", 1), ("b", 2), ("c", 3)]);
            let _ = cache.get(&"a");
            let _ = cache.get(&"a");
            let _ = cache.get(&"c");

            cache.put("d", 4);
            assert!(!cache.contains(&"b"));
            assert!(cache.contains(&"a"));
            assert!(cache.contains(&"c"));
            assert_eq!(cache.min_frequency(), 1);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn ties_break_by_least_recent_touch() {
            let mut cache = LfuCache::new(3);
            cache.extend([(1, ()), (2, ()), (3, ())]);
            assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(1));

            let _ = cache.get(&1);
            let _ = cache.get(&2);
            // 3 alone at freq 1
            assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(3));
            cache.put(4, ());
            assert!(!cache.contains(&3));

            // 4 at freq 1 is next, then 1 (reached freq 2 before 2 did)
            assert_eq!(cache.pop_lfu(), Some((4, ())));
            assert_eq!(cache.pop_lfu(), Some((1, ())));
            assert_eq!(cache.pop_lfu(), Some((2, ())));
            assert_eq!(cache.pop_lfu(), None);
            assert_eq!(cache.min_frequency(), 0);
        }

        #[test]
        fn hot_key_survives_scan() {
            let mut cache = LfuCache::new(3);
            cache.put("hot", 0);
            for _ in 0..4 {
                let _ = cache.get(&"hot");
            }
            for i in 0..10 {
                cache.put("cold", i);
                cache.remove(&"cold");
                cache.put("scan", i);
            }
            assert!(cache.contains(&"hot"));
            assert_eq!(cache.frequency(&"hot"), Some(5));
        }
    }

    mod levels {
        use super::*;

        /// Key k sits alone at frequency k, for k in 1..=n.
        fn staircase(n: u32) -> LfuCache<u32, u32> {
            let mut cache = LfuCache::new(n as usize);
            for k in 1..=n {
                cache.put(k, k);
                for _ in 1..k {
                    let _ = cache.get(&k);
                }
            }
            cache
        }

        fn level_values(cache: &LfuCache<u32, u32>) -> Vec<u64> {
            cache.levels.iter().copied().collect()
        }

        #[test]
        fn levels_track_live_frequencies_in_order() {
            let mut cache = staircase(5);
            assert_eq!(level_values(&cache), vec![1, 2, 3, 4, 5]);
            assert_eq!(cache.buckets.len(), 5);

            // 3 moves up into the existing level 4; level 3 disappears
            let _ = cache.get(&3);
            assert_eq!(level_values(&cache), vec![1, 2, 4, 5]);

            // 5 moves past the top; level 6 is linked after level 5 and 5 drops
            let _ = cache.get(&5);
            assert_eq!(level_values(&cache), vec![1, 2, 4, 6]);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn eviction_of_lone_minimum_reads_the_level_head() {
            let mut cache = staircase(64);

            // every put evicts the lone key at frequency 1, emptying that level
            for newcomer in 1_000..3_000 {
                cache.put(newcomer, 0);
                assert_eq!(cache.min_frequency(), 1);
                assert_eq!(cache.levels.len(), 64);
                assert_eq!(cache.levels.front(), Some(&1));
                assert_eq!(cache.levels.back(), Some(&64));
            }

            assert!(!cache.contains(&1));
            for k in 2..=64 {
                assert_eq!(cache.frequency(&k), Some(u64::from(k)));
            }
            assert!(cache.contains(&2_999));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn pop_and_remove_advance_minimum_to_next_level() {
            let mut cache = staircase(4);
            assert_eq!(cache.pop_lfu(), Some((1, 1)));
            assert_eq!(cache.min_frequency(), 2);

            assert_eq!(cache.remove(&2), Some(2));
            assert_eq!(cache.min_frequency(), 3);
            assert_eq!(level_values(&cache), vec![3, 4]);

            cache.clear();
            assert_eq!(cache.min_frequency(), 0);
            assert!(cache.levels.is_empty());
            cache.check_invariants().unwrap();
        }
    }

    mod removal {
        use super::*;

        #[test]
        fn remove_last_min_key_advances_minimum() {
            let mut cache = LfuCache::new(4);
            cache.put(1, 'a');
            cache.put(2, 'b');
            let _ = cache.get(&2);
            let _ = cache.get(&2);

            assert_eq!(cache.remove(&1), Some('a'));
            assert_eq!(cache.min_frequency(), 3);
            assert_eq!(cache.remove(&1), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn clear_resets_state_keeps_capacity() {
            let mut cache = LfuCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 2);
            assert_eq!(cache.min_frequency(), 0);
            assert_eq!(cache.get(&1), Err(CacheError::KeyNotFound));
            cache.check_invariants().unwrap();
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn snapshot_counts_bumps_and_evictions() {
            let mut cache = LfuCache::new(1);
            cache.put(1, 1);
            let _ = cache.get(&1);
            let _ = cache.get(&2);
            cache.put(2, 2);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.put_new, 2);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.frequency_bumps, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.min_frequency, 1);
        }
    }
}
