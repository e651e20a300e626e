use reqwest::{header::CONTENT_TYPE, Client as HttpClient, StatusCode};
use std::time::Duration;

use crate::{error::AppResult, services::posters::ImageResolver};

/// What a poster check found at the other end
#[derive(Debug, Clone, PartialEq, Eq)]
enum CheckOutcome {
    Image,
    Status(StatusCode),
    NotImage(String),
}

/// Verifies posters with a bounded HTTP GET
///
/// A poster is accepted only when the server answers `200 OK` with a
/// `Content-Type` mentioning `image`. The body is never read.
#[derive(Clone)]
pub struct HttpImageResolver {
    http_client: HttpClient,
    default_reference: String,
}

impl HttpImageResolver {
    pub fn new(default_reference: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, default_reference))
    }

    /// Uses a preconfigured client; its timeout bounds every check
    pub fn with_client(http_client: HttpClient, default_reference: String) -> Self {
        Self {
            http_client,
            default_reference,
        }
    }

    async fn check(&self, url: &str) -> AppResult<CheckOutcome> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(CheckOutcome::Status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();

        if content_type.contains("image") {
            Ok(CheckOutcome::Image)
        } else {
            Ok(CheckOutcome::NotImage(content_type))
        }
    }
}

#[async_trait::async_trait]
impl ImageResolver for HttpImageResolver {
    async fn resolve(&self, reference: &str) -> String {
        self.verdict(reference)
            .await
            .unwrap_or_else(|| self.default_reference.clone())
    }

    async fn verdict(&self, reference: &str) -> Option<String> {
        if reference.trim().is_empty() {
            return Some(self.default_reference.clone());
        }

        match self.check(reference).await {
            Ok(CheckOutcome::Image) => Some(reference.to_string()),
            Ok(CheckOutcome::Status(status)) => {
                tracing::debug!(url = %reference, status = %status, "Poster rejected: bad status");
                Some(self.default_reference.clone())
            }
            Ok(CheckOutcome::NotImage(content_type)) => {
                tracing::debug!(
                    url = %reference,
                    content_type = %content_type,
                    "Poster rejected: not an image"
                );
                Some(self.default_reference.clone())
            }
            Err(e) => {
                tracing::warn!(url = %reference, error = %e, "Poster unreachable");
                None
            }
        }
    }

    fn default_reference(&self) -> String {
        self.default_reference.clone()
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
