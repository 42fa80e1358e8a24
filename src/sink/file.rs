// src/sink/file.rs
use super::record::{Level, LogRecord};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to append to log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Append-only uptime log. Records are written whole and flushed one at a time.
#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    file: File,
}

impl LogSink {
    /// Open (or create) `{dir}/{name}.log` for appending.
    pub fn open<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self, SinkError> {
        let path = dir.as_ref().join(format!("{}.log", name));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;

        debug!("Opened uptime log at {}", path.display());
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp, format and append one record, mirroring it to the diagnostic log.
    pub fn record(&self, level: Level, message: &str) -> Result<LogRecord, SinkError> {
        let record = LogRecord::now(level, message);
        self.append(&record)?;

        match level {
            Level::Info => info!("{}", message),
            Level::Error => error!("{}", message),
        }

        Ok(record)
    }

    fn append(&self, record: &LogRecord) -> Result<(), SinkError> {
        let line = record.to_line();

        // `&File` implements Write, so the sink needs no interior lock.
        let mut file = &self.file;
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| SinkError::Write {
                path: self.path.clone(),
                source,
            })
    }
}
