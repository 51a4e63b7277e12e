//! Fixed-capacity FIFO ring buffer.
//!
//! A slot vector of `capacity` entries with a read position (`head`) and a
//! length. Writes land at `(head + len) % capacity`; reads take from `head`.
//! Unlike an overwriting ring, a full buffer rejects writes with
//! [`BufferError::Full`].
//!
//! ```text
//!   capacity = 4, after put 1,2,3 / get / put 4,5
//!
//!   slots: [ 5 | . | 3 | 4 ]       head = 2, len = 3
//!                    ▲
//!                    next get
//! ```

use crate::error::{BufferError, ConfigError};

/// Bounded FIFO queue over a fixed slot array.
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a ring with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use [`try_new`](Self::try_new) for
    /// user-supplied capacities.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(ring) => ring,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a ring with `capacity` slots, rejecting a capacity of 0.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { requested: capacity });
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            head: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `value` at the write position.
    pub fn put(&mut self, value: T) -> Result<(), BufferError> {
        if self.is_full() {
            return Err(BufferError::Full);
        }
        let tail = (self.head + self.len) % self.capacity();
        self.slots[tail] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the oldest value.
    pub fn get(&mut self) -> Result<T, BufferError> {
        if self.is_empty() {
            return Err(BufferError::Empty);
        }
        let value = self.slots[self.head].take().ok_or(BufferError::Empty)?;
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        Ok(value)
    }

    /// Returns the oldest value without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity();
        (0..self.len).filter_map(move |offset| self.slots[(self.head + offset) % capacity].as_ref())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.len <= self.capacity());
        assert!(self.head < self.capacity());
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, self.len);
        assert_eq!(self.iter().count(), self.len);
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    proptest! {
        /// Property: behaves like a VecDeque bounded at capacity.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_bounded_vecdeque(
            capacity in 1usize..8,
            ops in prop::collection::vec(prop::option::of(any::<u16>()), 0..100)
        ) {
            let mut buf = RingBuffer::new(capacity);
            let mut model = VecDeque::new();

            for op in ops {
                match op {
                    Some(v) => {
                        let expected = if model.len() == capacity {
                            Err(BufferError::Full)
                        } else {
                            model.push_back(v);
                            Ok(())
                        };
                        prop_assert_eq!(buf.put(v), expected);
                    }
                    None => {
                        prop_assert_eq!(buf.get(), model.pop_front().ok_or(BufferError::Empty));
                    }
                }
                prop_assert_eq!(buf.len(), model.len());
                prop_assert_eq!(buf.is_full(), model.len() == capacity);
            }
        }
    }
}
