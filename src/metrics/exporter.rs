use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::{FreqStackMetricsSnapshot, LfuMetricsSnapshot, LruMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for metrics snapshots.
///
/// Writes the Prometheus text exposition format so output can be scraped or
/// forwarded to an OpenTelemetry collector. Write errors are ignored; metrics
/// are observational.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("put_calls_total", snapshot.put_calls);
        self.write_counter("put_updates_total", snapshot.put_updates);
        self.write_counter("put_new_total", snapshot.put_new);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("pop_lru_calls_total", snapshot.pop_lru_calls);
        self.write_counter("pop_lru_found_total", snapshot.pop_lru_found);
        self.write_counter("touch_calls_total", snapshot.touch_calls);
        self.write_counter("touch_found_total", snapshot.touch_found);
        self.write_counter("peek_calls_total", snapshot.peek_calls);
        self.write_counter("peek_found_total", snapshot.peek_found);
        self.write_counter("recency_rank_calls_total", snapshot.recency_rank_calls);
        self.write_counter("recency_rank_found_total", snapshot.recency_rank_found);
        self.write_counter(
            "recency_rank_scan_steps_total",
            snapshot.recency_rank_scan_steps,
        );
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}

impl<W: Write + Send> MetricsExporter<LfuMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LfuMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("put_calls_total", snapshot.put_calls);
        self.write_counter("put_updates_total", snapshot.put_updates);
        self.write_counter("put_new_total", snapshot.put_new);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("pop_lfu_calls_total", snapshot.pop_lfu_calls);
        self.write_counter("pop_lfu_found_total", snapshot.pop_lfu_found);
        self.write_counter("frequency_bumps_total", snapshot.frequency_bumps);
        self.write_counter("peek_calls_total", snapshot.peek_calls);
        self.write_counter("peek_found_total", snapshot.peek_found);
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
        self.write_gauge("min_frequency", snapshot.min_frequency);
    }
}

impl<W: Write + Send> MetricsExporter<FreqStackMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &FreqStackMetricsSnapshot) {
        self.write_counter("push_calls_total", snapshot.push_calls);
        self.write_counter("pop_calls_total", snapshot.pop_calls);
        self.write_counter("pop_found_total", snapshot.pop_found);
        self.write_counter("pop_empty_total", snapshot.pop_empty);
        self.write_counter("levels_drained_total", snapshot.levels_drained);
        self.write_gauge("peak_frequency", snapshot.peak_frequency as u64);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_gauge("len", snapshot.len as u64);
        self.write_gauge("max_frequency", snapshot.max_frequency as u64);
    }
}
