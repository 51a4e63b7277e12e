use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, FreqStackMetricsRecorder, LfuMetricsRecorder, LruMetricsReadRecorder,
    LruMetricsRecorder, PeekMetricsReadRecorder,
};

#[derive(Debug, Default)]
pub struct LruMetrics {
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
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

#[derive(Debug, Default)]
pub struct LfuMetrics {
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
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
}

#[derive(Debug, Default)]
pub struct FreqStackMetrics {
    pub push_calls: u64,
    pub pop_calls: u64,
    pub pop_found: u64,
    pub pop_empty: u64,
    pub levels_drained: u64,
    pub peak_frequency: usize,
    pub clear_calls: u64,
}

// ---------------------------------------------------------------------------
// LruMetrics
// ---------------------------------------------------------------------------

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_put_new(&mut self) {
        self.put_calls += 1;
        self.put_new += 1;
    }

    fn record_put_update(&mut self) {
        self.put_calls += 1;
        self.put_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl PeekMetricsReadRecorder for LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}

impl LruMetricsReadRecorder for LruMetrics {
    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

// ---------------------------------------------------------------------------
// LfuMetrics
// ---------------------------------------------------------------------------

impl CoreMetricsRecorder for LfuMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_put_new(&mut self) {
        self.put_calls += 1;
        self.put_new += 1;
    }

    fn record_put_update(&mut self) {
        self.put_calls += 1;
        self.put_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LfuMetricsRecorder for LfuMetrics {
    fn record_pop_lfu_call(&mut self) {
        self.pop_lfu_calls += 1;
    }

    fn record_pop_lfu_found(&mut self) {
        self.pop_lfu_found += 1;
    }

    fn record_frequency_bump(&mut self) {
        self.frequency_bumps += 1;
    }
}

impl PeekMetricsReadRecorder for LfuMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}

// ---------------------------------------------------------------------------
// FreqStackMetrics
// ---------------------------------------------------------------------------

impl FreqStackMetricsRecorder for FreqStackMetrics {
    fn record_push(&mut self, new_frequency: usize) {
        self.push_calls += 1;
        self.peak_frequency = self.peak_frequency.max(new_frequency);
    }

    fn record_pop_found(&mut self) {
        self.pop_calls += 1;
        self.pop_found += 1;
    }

    fn record_pop_empty(&mut self) {
        self.pop_calls += 1;
        self.pop_empty += 1;
    }

    fn record_level_drained(&mut self) {
        self.levels_drained += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}
