// src/metrics/collector.rs
use crate::probe::Outcome;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    /// Prometheus text exposition of everything registered.
    pub fn gather(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeCounts {
    pub succeeded: u64,
    pub failed: u64,
}

impl ProbeCounts {
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed
    }
}

pub struct MetricsCollector {
    pub probes_total: IntCounterVec,
    pub probe_duration_seconds: Histogram,
    pub last_probe_success: IntGauge,
    pub sink_errors_total: IntCounter,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let probes_total = IntCounterVec::new(
            Opts::new("uptime_probes_total", "Total number of probes by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(probes_total.clone()))?;

        let probe_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "uptime_probe_duration_seconds",
            "Probe duration in seconds",
        ))?;
        registry.register(Box::new(probe_duration_seconds.clone()))?;

        let last_probe_success = IntGauge::new(
            "uptime_last_probe_success",
            "Outcome of the most recent probe (1=success, 0=failure)",
        )?;
        registry.register(Box::new(last_probe_success.clone()))?;

        let sink_errors_total = IntCounter::new(
            "uptime_sink_errors_total",
            "Total failed writes to the uptime log",
        )?;
        registry.register(Box::new(sink_errors_total.clone()))?;

        Ok(Self {
            probes_total,
            probe_duration_seconds,
            last_probe_success,
            sink_errors_total,
        })
    }

    pub fn record_probe(&self, outcome: &Outcome, duration: Duration) {
        self.probes_total
            .with_label_values(&[outcome.label()])
            .inc();
        self.probe_duration_seconds.observe(duration.as_secs_f64());
        self.last_probe_success
            .set(if outcome.is_success() { 1 } else { 0 });
    }

    pub fn record_sink_error(&self) {
        self.sink_errors_total.inc();
    }

    pub fn probe_counts(&self) -> ProbeCounts {
        ProbeCounts {
            succeeded: self.probes_total.with_label_values(&["success"]).get(),
            failed: self.probes_total.with_label_values(&["failure"]).get(),
        }
    }
}

// Helper for timing operations
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
