// src/config/models.rs
use super::{LOG_DIR, LOG_NAME, PROBE_PERIOD_SECS, TARGET_URL};
use anyhow::{bail, ensure, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub target: Url,
    pub period_secs: u64,
    pub log_dir: PathBuf,
    pub log_name: String,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub request_timeout_secs: Option<u64>,
}

impl MonitorConfig {
    pub fn from_constants() -> Result<Self> {
        Ok(Self {
            target: Url::parse(TARGET_URL)?,
            period_secs: PROBE_PERIOD_SECS,
            log_dir: PathBuf::from(LOG_DIR),
            log_name: LOG_NAME.to_string(),
            request_timeout_secs: None,
        })
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        match self.target.scheme() {
            "http" | "https" => {}
            other => bail!("Unsupported target scheme: {}", other),
        }
        ensure!(self.period_secs > 0, "Probe period must be greater than zero");
        ensure!(!self.log_name.trim().is_empty(), "Log name must not be empty");
        if let Some(timeout) = self.request_timeout_secs {
            ensure!(timeout > 0, "Request timeout must be greater than zero");
        }
        Ok(())
    }
}
