//! # Metrics Trait Hierarchy
//!
//! ```text
//!                  ┌─────────────────────────────┐
//!                  │     CoreMetricsRecorder     │
//!                  │  get_hit/get_miss/put       │
//!                  │  evict/clear                │
//!                  └──────────────┬──────────────┘
//!                        ┌────────┴────────┐
//!                        ▼                 ▼
//!                  ┌──────────┐      ┌──────────┐      ┌──────────────────┐
//!                  │   Lru    │      │   Lfu    │      │    FreqStack     │
//!                  │ Recorder │      │ Recorder │      │    Recorder      │
//!                  └──────────┘      └──────────┘      └──────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders only write counters; providers only snapshot; exporters only
//! publish.

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_put_new(&mut self);
    fn record_put_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Read-path counters recorded through `&self` (interior mutability).
pub trait PeekMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU metrics for `&self` methods.
pub trait LruMetricsReadRecorder: PeekMetricsReadRecorder {
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Metrics for LFU behavior (frequency order).
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
    fn record_frequency_bump(&mut self);
}

/// Metrics for the frequency stack.
pub trait FreqStackMetricsRecorder {
    fn record_push(&mut self, new_frequency: usize);
    fn record_pop_found(&mut self);
    fn record_pop_empty(&mut self);
    fn record_level_drained(&mut self);
    fn record_clear(&mut self);
}

/// Produces a point-in-time copy of a container's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
