pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{FreqStack, LinkedList, NodeHandle, RingBuffer, SlotArena, SlotId, SlotLookup};
pub use crate::error::{
    BufferError, CacheError, ConfigError, InvariantError, ListError, StackError,
};
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    exporter::PrometheusTextExporter,
    snapshot::{FreqStackMetricsSnapshot, LfuMetricsSnapshot, LruMetricsSnapshot},
    traits::{MetricsExporter, MetricsSnapshotProvider},
};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, MutableCache};
