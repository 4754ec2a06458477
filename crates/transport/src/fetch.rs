//! The network primitive underneath the transport

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP round-trip and reads the complete body as text.
///
/// Implementations must not classify status codes: every response that was
/// received, whatever its status, is `Ok`. `Err` is reserved for failures
/// where no response was obtained. Dropping the returned future must abort
/// the request.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Execute a request
    async fn fetch(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// [`Fetcher`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    inner: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with a fresh `reqwest` client
    pub fn new() -> ApiResult<Self> {
        let inner = Client::builder().build().map_err(ApiError::from)?;
        Ok(Self { inner })
    }

    /// Wrap an existing `reqwest` client
    #[must_use]
    pub fn with_client(inner: Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = self.inner.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        trace!(
            url = %request.url,
            status = status.as_u16(),
            bytes = body.len(),
            "Response received"
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}
