// src/monitor/mod.rs
mod scheduler;

pub use scheduler::{Monitor, MonitorState};
