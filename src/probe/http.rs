// src/probe/http.rs
use super::{Outcome, Probe};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Issues one plain GET per probe against a fixed URL.
pub struct HttpProber {
    url: Url,
    client: Client,
}

impl HttpProber {
    pub fn new(url: Url, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            url,
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self) -> Outcome {
        debug!("Probing {}", self.url);

        match self.client.get(self.url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Outcome::Success
                } else {
                    Outcome::failure(format!("HTTP {}", status))
                }
            }
            Err(e) => Outcome::from_error(&e),
        }
    }

    fn target(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn prober_for(url: &str) -> HttpProber {
        HttpProber::new(Url::parse(url).unwrap(), Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_probe_success_on_200() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let outcome = prober_for(&server.url()).probe().await;

        assert_eq!(outcome, Outcome::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_failure_on_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(503)
            .create_async()
            .await;

        let outcome = prober_for(&server.url()).probe().await;

        assert_eq!(
            outcome,
            Outcome::Failure("HTTP 503 Service Unavailable".to_string())
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_failure_on_unfollowed_redirect_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(304)
            .create_async()
            .await;

        let outcome = prober_for(&server.url()).probe().await;

        assert_eq!(outcome, Outcome::Failure("HTTP 304 Not Modified".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_failure_on_connection_refused() {
        // Bind then drop a listener to get a port nobody is serving.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let outcome = prober_for(&format!("http://{}/", addr)).probe().await;

        match outcome {
            Outcome::Failure(detail) => {
                assert!(
                    detail.to_lowercase().contains("connection refused"),
                    "unexpected detail: {}",
                    detail
                );
            }
            Outcome::Success => panic!("probe against a closed port succeeded"),
        }
    }

    #[tokio::test]
    async fn test_probe_makes_a_single_attempt() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let outcome = prober_for(&server.url()).probe().await;

        assert!(!outcome.is_success());
        mock.assert_async().await;
    }
}
