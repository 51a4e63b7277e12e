//! Opt-in counters for the caches and the frequency stack (`metrics` feature).
//!
//! Recording, snapshotting and exporting are split into separate traits:
//! containers write counters through recorder traits, callers read them via
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider), and
//! [`PrometheusTextExporter`](exporter::PrometheusTextExporter) publishes a
//! snapshot in the Prometheus text format.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
