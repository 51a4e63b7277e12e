#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LfuMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub frequency_bumps: u64,
    pub peek_calls: u64,
    pub peek_found: u64,

    pub cache_len: usize,
    pub capacity: usize,
    pub min_frequency: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FreqStackMetricsSnapshot {
    pub push_calls: u64,
    pub pop_calls: u64,
    pub pop_found: u64,
    pub pop_empty: u64,
    pub levels_drained: u64,
    pub peak_frequency: usize,
    pub clear_calls: u64,

    pub len: usize,
    pub max_frequency: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `get` calls that hit, or 0.0 before the first call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

impl LfuMetricsSnapshot {
    /// Fraction of `get` calls that hit, or 0.0 before the first call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
