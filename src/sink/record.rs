// src/sink/record.rs
use chrono::{Local, NaiveDateTime, SubsecRound};
use std::fmt;
use std::str::FromStr;

/// `2018-01-09 14:03:27,512`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

const SEPARATOR: &str = " - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INFO" => Ok(Level::Info),
            "ERROR" => Ok(Level::Error),
            other => Err(ParseRecordError::UnknownLevel(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseRecordError {
    #[error("Malformed timestamp in log line: {0}")]
    Timestamp(String),

    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Log line is missing the message separator")]
    MissingSeparator,
}

/// One line of the uptime log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub level: Level,
    pub message: String,
}

impl LogRecord {
    /// Stamp a record with the local wall-clock time, at the millisecond
    /// precision the line format keeps.
    pub fn now(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local().trunc_subsecs(3),
            level,
            message: message.into(),
        }
    }

    /// Render the record as a single line, terminator included.
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level,
            SEPARATOR,
            escape_line_breaks(&self.message)
        )
    }
}

impl FromStr for LogRecord {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let (head, message) = line
            .split_once(SEPARATOR)
            .ok_or(ParseRecordError::MissingSeparator)?;

        // The timestamp itself contains one space: "<date> <time> <LEVEL>"
        let (stamp, level) = head
            .rsplit_once(' ')
            .ok_or_else(|| ParseRecordError::Timestamp(head.to_string()))?;

        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .map_err(|_| ParseRecordError::Timestamp(stamp.to_string()))?;

        Ok(Self {
            timestamp,
            level: level.parse()?,
            message: unescape_line_breaks(message),
        })
    }
}

fn escape_line_breaks(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape_line_breaks(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut chars = message.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
