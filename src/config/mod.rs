// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};

/// Target probed by the monitor.
pub const TARGET_URL: &str = "https://www.google.com";

/// Seconds between the end of one probe and the start of the next.
pub const PROBE_PERIOD_SECS: u64 = 20;

/// Directory the uptime log is written to.
pub const LOG_DIR: &str = "./";

/// File stem of the uptime log (`uptime.log`).
pub const LOG_NAME: &str = "uptime";

/// Build the monitor configuration from the compiled-in constants.
pub fn load_config() -> Result<MonitorConfig> {
    let config = MonitorConfig::from_constants().context("Invalid built-in configuration")?;
    config.validate()?;
    Ok(config)
}
