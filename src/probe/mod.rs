// src/probe/mod.rs
mod http;
mod outcome;

pub use http::HttpProber;
pub use outcome::Outcome;

use async_trait::async_trait;

/// A single reachability check. Implementations make exactly one attempt per call.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self) -> Outcome;

    fn target(&self) -> &str;
}
