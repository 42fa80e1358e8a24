// src/probe/outcome.rs
use std::error::Error as StdError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    pub fn failure(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if detail.trim().is_empty() {
            Outcome::Failure("unknown error".to_string())
        } else {
            Outcome::Failure(detail)
        }
    }

    /// Collapse an error and its source chain into a single failure.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        Self::failure(describe_error(err))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure(_) => "failure",
        }
    }
}

/// Join an error with its sources, skipping any source whose text the
/// message already carries.
fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }

    detail
}
