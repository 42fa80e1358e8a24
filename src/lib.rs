// src/lib.rs
pub mod config;
pub mod metrics;
pub mod monitor;
pub mod probe;
pub mod sink;
