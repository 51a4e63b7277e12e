//! Error types for the nodekit library.
//!
//! ## Key Components
//!
//! - [`ListError`]: Returned by [`LinkedList`](crate::ds::LinkedList) operations
//!   (empty list, missing item, bad or stale node handle).
//! - [`CacheError`]: Returned by cache lookups ([`KeyNotFound`](CacheError::KeyNotFound)).
//! - [`StackError`]: Returned by [`FreqStack::pop`](crate::ds::FreqStack::pop).
//! - [`BufferError`]: Returned by [`RingBuffer`](crate::ds::RingBuffer) put/get.
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (capacity < 1).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   data-structure invariants are violated.
//!
//! Containers that forward list errors do so unchanged through the
//! `List(ListError)` variants, via the `From` impls below.
//!
//! ## Example Usage
//!
//! ```
//! use nodekit::error::{CacheError, ConfigError};
//! use nodekit::policy::lru::LruCache;
//!
//! let bad = LruCache::<u32, u32>::try_new(0);
//! assert_eq!(bad.unwrap_err(), ConfigError::InvalidCapacity { requested: 0 });
//!
//! let mut cache = LruCache::try_new(2).unwrap();
//! cache.put(1, "one");
//! assert_eq!(cache.get(&7), Err(CacheError::KeyNotFound));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ListError
// ---------------------------------------------------------------------------

/// Error returned by [`LinkedList`](crate::ds::LinkedList) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListError {
    /// The list has zero nodes.
    EmptyList,
    /// No node matched the predicate, value, or index.
    ItemNotFound,
    /// The handle was never issued by this list.
    InvalidItem,
    /// The handle named a node that has since been removed.
    StaleHandle,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::EmptyList => f.write_str("list is empty"),
            ListError::ItemNotFound => f.write_str("item not found in list"),
            ListError::InvalidItem => f.write_str("handle does not belong to this list"),
            ListError::StaleHandle => f.write_str("handle refers to a removed node"),
        }
    }
}

impl std::error::Error for ListError {}

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by cache lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheError {
    /// The key is not present in the cache.
    KeyNotFound,
    /// The recency/frequency list rejected an operation.
    List(ListError),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::KeyNotFound => f.write_str("key not found"),
            CacheError::List(err) => write!(f, "cache order list: {}", err),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::KeyNotFound => None,
            CacheError::List(err) => Some(err),
        }
    }
}

impl From<ListError> for CacheError {
    fn from(err: ListError) -> Self {
        CacheError::List(err)
    }
}

// ---------------------------------------------------------------------------
// StackError
// ---------------------------------------------------------------------------

/// Error returned by [`FreqStack`](crate::ds::FreqStack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackError {
    /// No elements are currently held.
    EmptyStack,
    /// A frequency bucket rejected an operation.
    List(ListError),
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::EmptyStack => f.write_str("stack is empty"),
            StackError::List(err) => write!(f, "frequency bucket: {}", err),
        }
    }
}

impl std::error::Error for StackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StackError::EmptyStack => None,
            StackError::List(err) => Some(err),
        }
    }
}

impl From<ListError> for StackError {
    fn from(err: ListError) -> Self {
        StackError::List(err)
    }
}

// ---------------------------------------------------------------------------
// BufferError
// ---------------------------------------------------------------------------

/// Error returned by [`RingBuffer`](crate::ds::RingBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferError {
    /// The buffer holds `capacity` values.
    Full,
    /// The buffer holds no values.
    Empty,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Full => f.write_str("buffer is full"),
            BufferError::Empty => f.write_str("buffer is empty"),
        }
    }
}

impl std::error::Error for BufferError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::try_new`](crate::policy::lru::LruCache::try_new) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use nodekit::error::ConfigError;
/// use nodekit::policy::lfu::LfuCache;
///
/// let err = LfuCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// Capacity must be at least 1.
    InvalidCapacity {
        /// The rejected capacity.
        requested: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacity { requested } => {
                write!(f, "capacity must be >= 1 (got {})", requested)
            },
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal container invariants are violated.
///
/// Produced by `check_invariants` methods (e.g.
/// [`FreqStack::check_invariants`](crate::ds::FreqStack::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
