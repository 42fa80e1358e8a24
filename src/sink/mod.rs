// src/sink/mod.rs
mod file;
mod record;

pub use file::{LogSink, SinkError};
pub use record::{Level, LogRecord, ParseRecordError, TIMESTAMP_FORMAT};
