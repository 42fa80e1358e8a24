// src/monitor/scheduler.rs
use crate::config::MonitorConfig;
use crate::metrics::{MetricsCollector, Timer};
use crate::probe::{HttpProber, Outcome, Probe};
use crate::sink::{Level, LogSink};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

const CONNECTED: &str = "connected";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    Stopped,
}

/// Probes one target on a fixed period and appends every outcome to the sink.
pub struct Monitor {
    prober: Box<dyn Probe>,
    sink: LogSink,
    period: Duration,
    metrics: Arc<MetricsCollector>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Monitor {
    pub fn new(
        prober: Box<dyn Probe>,
        sink: LogSink,
        period: Duration,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            prober,
            sink,
            period,
            metrics,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Open the uptime log and build the HTTP prober described by `config`.
    /// Fails before a monitor exists, so an unwritable log never reaches the loop.
    pub fn from_config(config: &MonitorConfig, metrics: Arc<MetricsCollector>) -> Result<Self> {
        let sink = LogSink::open(&config.log_dir, &config.log_name)
            .context("Cannot open uptime log")?;

        let prober = HttpProber::new(config.target.clone(), config.request_timeout())
            .context("Failed to create HTTP client")?;

        Ok(Self::new(Box::new(prober), sink, config.period(), metrics))
    }

    /// Run until `shutdown` is called. Returns the terminal state.
    pub async fn run(self: Arc<Self>) -> MonitorState {
        let mut shutdown_rx = self.shutdown_rx.clone();
        let mut state = MonitorState::Running;

        info!(
            "Monitoring {} every {:?}, logging to {}",
            self.prober.target(),
            self.period,
            self.sink.path().display()
        );

        while state == MonitorState::Running {
            state = self.iterate(&mut shutdown_rx).await;
        }

        info!("Monitor stopped");
        state
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// One probe, one record, one wait. Shutdown wins any race.
    async fn iterate(&self, shutdown_rx: &mut watch::Receiver<bool>) -> MonitorState {
        if *shutdown_rx.borrow() {
            return MonitorState::Stopped;
        }

        let timer = Timer::new();
        let outcome = tokio::select! {
            outcome = self.prober.probe() => outcome,
            _ = shutdown_requested(shutdown_rx) => {
                debug!("Shutdown requested during probe");
                return MonitorState::Stopped;
            }
        };

        self.metrics.record_probe(&outcome, timer.elapsed());
        self.log_outcome(&outcome);

        tokio::select! {
            _ = sleep(self.period) => MonitorState::Running,
            _ = shutdown_requested(shutdown_rx) => MonitorState::Stopped,
        }
    }

    fn log_outcome(&self, outcome: &Outcome) {
        let result = match outcome {
            Outcome::Success => self.sink.record(Level::Info, CONNECTED),
            Outcome::Failure(detail) => self.sink.record(Level::Error, detail),
        };

        if let Err(e) = result {
            error!("Uptime log write failed: {}", e);
            self.metrics.record_sink_error();
        }
    }
}

async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone: nobody can ask us to stop any more.
            std::future::pending::<()>().await;
        }
    }
}
