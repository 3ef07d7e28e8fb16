//! HTTP publisher

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use trackr_core::{TrackerConfig, TrackerError, TrackerResult};

use crate::outcome::{classify_status, Collector, PublishOutcome};
use crate::supervisor::TimeoutSupervisor;

/// Publishes rendered samples to the collection endpoint
pub struct HttpPublisher {
    client: reqwest::Client,
    endpoint: String,
    supervisor: TimeoutSupervisor,
}

impl HttpPublisher {
    /// Create a publisher for the given endpoint
    pub fn new(endpoint: impl Into<String>, publish_timeout: Duration) -> TrackerResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        Ok(HttpPublisher {
            client,
            endpoint: endpoint.into(),
            supervisor: TimeoutSupervisor::new(publish_timeout),
        })
    }

    pub fn from_config(config: &TrackerConfig) -> TrackerResult<Self> {
        HttpPublisher::new(config.endpoint.clone(), config.publish_timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Collector for HttpPublisher {
    /// Deliver one sample
    ///
    /// The watchdog armed here is advisory: the request itself is awaited
    /// to completion and the loop issuing it services nothing else until
    /// it returns.
    async fn publish(&self, payload: &str) -> PublishOutcome {
        let armed = self.supervisor.arm(&self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_owned())
            .send()
            .await;

        drop(armed);

        match response {
            Ok(response) => classify_status(response.status().as_u16()),
            Err(e) => {
                let reason = error_chain(&e);
                tracing::error!("publish transport failure: {}", reason);
                if reason.to_ascii_lowercase().contains("certificate") {
                    tracing::error!(
                        "certificate validation failed; verify the system date before suspecting the collector"
                    );
                }
                PublishOutcome::Transport { reason }
            }
        }
    }
}

/// Flatten an error and its sources into one diagnostic string
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Accept one request, answer with a canned status line, close
    async fn stub_collector(response: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut raw = vec![0u8; 8192];
                let mut total = 0;
                loop {
                    match stream.read(&mut raw[total..]).await {
                        Ok(0) => break,
                        Ok(n) => {
                            total += n;
                            if request_complete(&raw[..total]) || total == raw.len() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        addr
    }

    /// Headers finished and the announced body fully received
    fn request_complete(raw: &[u8]) -> bool {
        let Some(header_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&raw[..header_end]);
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.trim().eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    #[tokio::test]
    async fn test_204_classifies_as_success() {
        let addr =
            stub_collector("HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n").await;
        let publisher = HttpPublisher::new(
            format!("http://{}/animal/points", addr),
            Duration::from_secs(60),
        )
        .unwrap();

        let outcome = publisher.publish("{\"tracker\":\"t\"}").await;
        assert_eq!(outcome, PublishOutcome::Success { status: 204 });
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_503_classifies_as_rejected() {
        let addr = stub_collector(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let publisher = HttpPublisher::new(
            format!("http://{}/animal/points", addr),
            Duration::from_secs(60),
        )
        .unwrap();

        let outcome = publisher.publish("{\"tracker\":\"t\"}").await;
        assert_eq!(outcome, PublishOutcome::Rejected { status: 503 });
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_transport_outcome() {
        // Grab a port, then close it again
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let publisher = HttpPublisher::new(
            format!("http://{}/animal/points", addr),
            Duration::from_secs(60),
        )
        .unwrap();
        assert_eq!(
            publisher.endpoint(),
            format!("http://{}/animal/points", addr)
        );

        let outcome = publisher.publish("{}").await;
        assert!(matches!(outcome, PublishOutcome::Transport { .. }));
    }
}
