//! Frequency-ordered stack.
//!
//! [`FreqStack::pop`] returns the most recently pushed value among those with
//! the highest push count. Each frequency level owns a LIFO bucket; a value
//! pushed for the k-th time is appended to bucket k while its earlier copies
//! stay in buckets 1..k-1.
//!
//! ## Architecture
//!
//! ```text
//!   push 1, 2, 2, 3, 3, 1, 1, 4
//!
//!   freqs: { 1: 3, 2: 2, 3: 2, 4: 1 }        max_frequency = 3
//!
//!   buckets:
//!     freq=1: [1, 2, 3, 4] ◄── back (pop here)
//!     freq=2: [2, 3, 1]
//!     freq=3: [1]
//!
//!   pop order: 1, 1, 3, 2, 4, 3, 2, 1
//! ```
//!
//! ## Why `max_frequency -= 1` is enough
//!
//! A value's count only ever grows by one per push, so a value at frequency f
//! has one copy in each bucket 1..=f. When bucket f drains, every remaining
//! value has frequency <= f - 1, and any value that reached f passed through
//! f - 1, so bucket f - 1 is non-empty unless the stack itself is empty.
//! [`check_invariants`](FreqStack::check_invariants) verifies this directly.
//!
//! ## Operations
//!
//! | Operation   | Time       | Notes                                  |
//! |-------------|------------|----------------------------------------|
//! | `push`      | O(1) avg   | Hash lookup + bucket append            |
//! | `pop`       | O(1) avg   | Bucket pop at `max_frequency`          |
//! | `peek`      | O(1) avg   | Back of the top bucket                 |
//! | `frequency` | O(1) avg   | Current push count of a value          |
//! | `clear`     | O(n)       | Drops every bucket                     |
//!
//! ## Example
//!
//! ```
//! use nodekit::ds::FreqStack;
//!
//! let mut stack = FreqStack::new();
//! for v in [1, 2, 2, 3] {
//!     stack.push(v);
//! }
//! assert_eq!(stack.pop(), Ok(2));
//! assert_eq!(stack.pop(), Ok(3));
//! assert_eq!(stack.pop(), Ok(2));
//! assert_eq!(stack.pop(), Ok(1));
//! assert!(stack.pop().is_err());
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::linked_list::LinkedList;
use crate::error::{InvariantError, StackError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::FreqStackMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::FreqStackMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{FreqStackMetricsRecorder, MetricsSnapshotProvider};

/// Stack that pops the most recent value among the most frequently pushed.
#[derive(Debug)]
pub struct FreqStack<T>
where
    T: Eq + Hash + Clone,
{
    freqs: FxHashMap<T, usize>,
    buckets: FxHashMap<usize, LinkedList<T>>,
    max_frequency: usize,
    len: usize,
    #[cfg(feature = "metrics")]
    metrics: FreqStackMetrics,
}

impl<T> FreqStack<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            freqs: FxHashMap::default(),
            buckets: FxHashMap::default(),
            max_frequency: 0,
            len: 0,
            #[cfg(feature = "metrics")]
            metrics: FreqStackMetrics::default(),
        }
    }

    /// Pushes `value`, raising its frequency by one.
    pub fn push(&mut self, value: T) {
        let freq = {
            let count = self.freqs.entry(value.clone()).or_insert(0);
            *count += 1;
            *count
        };

        self.buckets.entry(freq).or_default().push_back(value);
        if freq > self.max_frequency {
            self.max_frequency = freq;
        }
        self.len += 1;

        #[cfg(feature = "metrics")]
        self.metrics.record_push(freq);
    }

    /// Removes and returns the most recently pushed value among those with the
    /// highest frequency.
    pub fn pop(&mut self) -> Result<T, StackError> {
        let top = self.max_frequency;
        let bucket = match self.buckets.get_mut(&top) {
            Some(bucket) => bucket,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_pop_empty();
                return Err(StackError::EmptyStack);
            },
        };

        let value = bucket.pop_back()?;
        if bucket.is_empty() {
            self.buckets.remove(&top);
            self.max_frequency -= 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_level_drained();
        }

        if let Some(count) = self.freqs.get_mut(&value) {
            *count -= 1;
            if *count == 0 {
                self.freqs.remove(&value);
            }
        }
        self.len -= 1;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_found();

        Ok(value)
    }

    /// Returns the value the next [`pop`](Self::pop) would remove.
    pub fn peek(&self) -> Option<&T> {
        self.buckets
            .get(&self.max_frequency)
            .and_then(|bucket| bucket.back())
    }

    /// Returns how many times `value` is currently held (0 if absent).
    pub fn frequency(&self, value: &T) -> usize {
        self.freqs.get(value).copied().unwrap_or(0)
    }

    /// Returns the highest frequency currently held (0 if empty).
    pub fn max_frequency(&self) -> usize {
        self.max_frequency
    }

    /// Returns the number of held elements (pushes minus pops).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every element and resets `max_frequency` to 0.
    pub fn clear(&mut self) {
        self.freqs.clear();
        self.buckets.clear();
        self.max_frequency = 0;
        self.len = 0;

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Verifies bucket/frequency bookkeeping.
    ///
    /// Checks that every bucket is non-empty and internally consistent, that
    /// bucket sizes sum to [`len`](Self::len), that `max_frequency` is the
    /// highest bucket (0 when empty), that levels `1..=max_frequency` are all
    /// populated, and that each value appears in exactly the buckets
    /// `1..=frequency(value)`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut total = 0usize;
        let mut highest = 0usize;
        let mut seen: FxHashMap<&T, usize> = FxHashMap::default();

        for (&freq, bucket) in &self.buckets {
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("bucket {} is empty", freq)));
            }
            bucket.check_invariants()?;
            total += bucket.len();
            highest = highest.max(freq);

            for value in bucket.iter() {
                let count = self.freqs.get(value).copied().unwrap_or(0);
                if count < freq {
                    return Err(InvariantError::new(format!(
                        "value in bucket {} has frequency {}",
                        freq, count
                    )));
                }
                *seen.entry(value).or_insert(0) += 1;
            }
        }

        if total != self.len {
            return Err(InvariantError::new(format!(
                "bucket sizes sum to {}, len = {}",
                total, self.len
            )));
        }
        if highest != self.max_frequency {
            return Err(InvariantError::new(format!(
                "max_frequency = {}, highest bucket = {}",
                self.max_frequency, highest
            )));
        }
        if (1..=self.max_frequency).any(|f| !self.buckets.contains_key(&f)) {
            return Err(InvariantError::new("frequency levels are not contiguous"));
        }
        if seen.len() != self.freqs.len() {
            return Err(InvariantError::new(format!(
                "{} distinct values in buckets, {} in frequency index",
                seen.len(),
                self.freqs.len()
            )));
        }
        for (value, &count) in &self.freqs {
            if seen.get(value).copied() != Some(count) {
                return Err(InvariantError::new(
                    "value bucket copies disagree with its frequency",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<T> FreqStack<T>
where
    T: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> FreqStackMetricsSnapshot {
        FreqStackMetricsSnapshot {
            push_calls: self.metrics.push_calls,
            pop_calls: self.metrics.pop_calls,
            pop_found: self.metrics.pop_found,
            pop_empty: self.metrics.pop_empty,
            levels_drained: self.metrics.levels_drained,
            peak_frequency: self.metrics.peak_frequency,
            clear_calls: self.metrics.clear_calls,
            len: self.len,
            max_frequency: self.max_frequency,
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<FreqStackMetricsSnapshot> for FreqStack<T>
where
    T: Eq + Hash + Clone,
{
    fn snapshot(&self) -> FreqStackMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<T> Default for FreqStack<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for FreqStack<T>
where
    T: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
