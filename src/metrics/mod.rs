// src/metrics/mod.rs
mod collector;

pub use collector::{MetricsCollector, MetricsRegistry, ProbeCounts, Timer};
