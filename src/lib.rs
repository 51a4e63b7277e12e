//! nodekit: arena-backed linked list, LRU/LFU caches and a frequency stack.
//!
//! Nodes live in a generational [`SlotArena`](ds::SlotArena) owned by their
//! list. Callers hold [`NodeHandle`](ds::NodeHandle)s, so a removed or foreign
//! node is reported as an error instead of being dereferenced.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod policy;
pub mod prelude;
pub mod traits;
