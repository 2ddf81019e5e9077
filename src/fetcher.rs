use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::ServiceConfig;

/// Downloads the raw bytes behind a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(error_chain(&e)))?;
        Ok(Self { client, timeout })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, FetchError> {
        Self::new(
            Duration::from_secs(config.fetch_timeout_secs),
            &config.user_agent,
        )
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> FetchError {
        let reason = error_chain(&err);
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if err.is_builder() {
            FetchError::InvalidUrl {
                url: url.to_string(),
                reason,
            }
        } else if err.is_connect() {
            FetchError::Connect {
                url: url.to_string(),
                reason,
            }
        } else if err.is_body() || err.is_decode() {
            FetchError::Body {
                url: url.to_string(),
                reason,
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                reason,
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(url, e))?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

/// reqwest's top-level message hides the root cause (DNS, refused, TLS), so
/// join the whole source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::Router;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to random port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{}", addr)
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::from_config(&ServiceConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_bytes() {
        let router = Router::new().route("/doc.pdf", get(|| async { "%PDF-1.4 body" }));
        let base = spawn_server(router).await;

        let bytes = fetcher().fetch(&format!("{}/doc.pdf", base)).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 body");
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let router = Router::new().route(
            "/ua",
            get(|headers: HeaderMap| async move {
                headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            }),
        );
        let base = spawn_server(router).await;

        let bytes = fetcher().fetch(&format!("{}/ua", base)).await.unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            crate::models::config::DEFAULT_USER_AGENT
        );
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let router = Router::new().route(
            "/missing.pdf",
            get(|| async { (StatusCode::NOT_FOUND, "gone") }),
        );
        let base = spawn_server(router).await;

        let err = fetcher()
            .fetch(&format!("{}/missing.pdf", base))
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("Expected Status, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let router = Router::new().route(
            "/broken",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_server(router).await;

        let err = fetcher().fetch(&format!("{}/broken", base)).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 500"), "got: {}", err);
    }

    #[test]
    fn test_bad_user_agent_is_client_error() {
        match HttpFetcher::new(Duration::from_secs(1), "bad\nagent") {
            Ok(_) => panic!("control characters accepted in User-Agent"),
            Err(err) => assert!(matches!(err, FetchError::Client(_)), "got: {:?}", err),
        }
    }

    #[tokio::test]
    async fn test_empty_url_is_invalid_url() {
        let err = fetcher().fetch("").await.unwrap_err();
        assert!(
            matches!(err, FetchError::InvalidUrl { .. }),
            "got: {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_error() {
        // Bind then drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetcher()
            .fetch(&format!("http://{}/doc.pdf", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Connect { .. }), "got: {:?}", err);
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base = spawn_server(router).await;

        let fetcher = HttpFetcher::new(Duration::from_millis(200), "test").unwrap();
        let err = fetcher.fetch(&format!("{}/slow", base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }), "got: {:?}", err);
    }
}
