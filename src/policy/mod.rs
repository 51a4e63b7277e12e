//! Fixed-capacity cache eviction policies.

pub mod lfu;
pub mod lru;

pub use lfu::LfuCache;
pub use lru::LruCache;
