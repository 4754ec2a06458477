//! The HTTP transport
//!
//! Every call goes through the same steps: resolve the token, build the
//! request, fetch, screen the response, decode the body. GETs additionally
//! pass through the [`PendingRequests`] cache so concurrent identical reads
//! share one round-trip.

use futures::future::FutureExt;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::cache::{Lookup, PendingHandle, PendingRequests};
use crate::config::TransportConfig;
use crate::error::{ApiError, ApiResult, ErrorPayload};
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, CLIENT_NAME, X_SIPGATE_CLIENT};
use crate::interceptor::{Replay, ResponseInterceptor, UnauthorizedHandler};
use crate::token::TokenSource;

/// HTTP transport for the sipgate REST API
///
/// Cheap to clone; clones share configuration, fetcher and dedup cache.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    api_url: String,
    token_source: RwLock<TokenSource>,
    on_unauthorized: Option<UnauthorizedHandler>,
    interceptor: Option<Arc<dyn ResponseInterceptor>>,
    skip_response_error_handling: bool,
    cancellation: Option<CancellationToken>,
    fetcher: Arc<dyn Fetcher>,
    pending: PendingRequests,
}

/// Everything needed to (re-)issue one request
pub(crate) struct PreparedRequest {
    pub(crate) method: HttpMethod,
    pub(crate) url: String,
    body: Option<String>,
    authenticated: bool,
}

/// Where a response is in the screening pipeline
enum Screening {
    Received(HttpResponse),
    Unauthorized(HttpResponse),
    Authorized(HttpResponse),
    Intercepting(HttpResponse),
    Resolved(HttpResponse),
}

impl Transport {
    /// Create a transport backed by `reqwest`
    pub fn new(config: TransportConfig) -> ApiResult<Self> {
        Self::from_parts(config, Arc::new(ReqwestFetcher::new()?), PendingRequests::new())
    }

    /// Create a transport with configuration from the environment
    pub fn from_env() -> ApiResult<Self> {
        Self::new(TransportConfig::from_env()?)
    }

    /// Create a transport with a custom fetcher and its own dedup cache
    pub fn with_fetcher(
        config: TransportConfig,
        fetcher: impl Fetcher + 'static,
    ) -> ApiResult<Self> {
        Self::from_parts(config, Arc::new(fetcher), PendingRequests::new())
    }

    /// Create a transport from explicit parts.
    ///
    /// Passing the same [`PendingRequests`] to several transports makes them
    /// dedupe GETs against each other.
    pub fn from_parts(
        config: TransportConfig,
        fetcher: Arc<dyn Fetcher>,
        pending: PendingRequests,
    ) -> ApiResult<Self> {
        config.validate()?;

        Ok(Self {
            inner: Arc::new(Inner {
                api_url: config.api_url,
                token_source: RwLock::new(config.token_source),
                on_unauthorized: config.on_unauthorized,
                interceptor: config.interceptor,
                skip_response_error_handling: config.skip_response_error_handling,
                cancellation: config.cancellation,
                fetcher,
                pending,
            }),
        })
    }

    /// Derive a transport bound to `token`.
    ///
    /// Configuration is copied, the fetcher and dedup cache are shared.
    /// Cancelling `token` only affects requests issued through the derived
    /// transport.
    #[must_use]
    pub fn cancellable(&self, token: CancellationToken) -> Self {
        let inner = &self.inner;
        Self {
            inner: Arc::new(Inner {
                api_url: inner.api_url.clone(),
                token_source: RwLock::new(inner.token_source()),
                on_unauthorized: inner.on_unauthorized.clone(),
                interceptor: inner.interceptor.clone(),
                skip_response_error_handling: inner.skip_response_error_handling,
                cancellation: Some(token),
                fetcher: Arc::clone(&inner.fetcher),
                pending: inner.pending.clone(),
            }),
        }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.inner.api_url
    }

    /// Dedup cache used by this transport
    #[must_use]
    pub fn pending(&self) -> &PendingRequests {
        &self.inner.pending
    }

    /// Whether non-2xx responses are passed through
    #[must_use]
    pub fn skips_response_error_handling(&self) -> bool {
        self.inner.skip_response_error_handling
    }

    /// Whether this transport's cancellation token has been triggered
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Replace the token source with a fixed token (`None` clears it)
    pub fn set_token(&self, token: Option<String>) {
        *self
            .inner
            .token_source
            .write()
            .unwrap_or_else(PoisonError::into_inner) = TokenSource::from_token(token);
    }

    /// Resolve the token the next authenticated request would carry
    pub async fn token(&self) -> ApiResult<Option<String>> {
        self.inner.token().await
    }

    /// Authenticated GET
    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.get_with(path, true).await
    }

    /// GET without an `Authorization` header
    pub async fn get_unauthenticated(&self, path: &str) -> ApiResult<Value> {
        self.get_with(path, false).await
    }

    /// GET, joining an identical request that is already in flight
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn get_with(&self, path: &str, authenticated: bool) -> ApiResult<Value> {
        let url = self.inner.url(path)?;

        loop {
            let (lookup, response) = self.inner.pending.join_or_insert(&url, |id| {
                let inner = Arc::clone(&self.inner);
                let prepared = PreparedRequest {
                    method: HttpMethod::Get,
                    url: url.clone(),
                    body: None,
                    authenticated,
                };
                async move {
                    let result = inner.execute(&prepared).await;
                    inner.pending.remove(&prepared.url, id);
                    result
                }
                .boxed()
            });

            let handle = PendingHandle::new(
                self.inner.pending.clone(),
                url.clone(),
                lookup.id(),
                response,
            );

            match lookup {
                Lookup::Issued { .. } => {
                    debug!(url = %url, "Issuing GET");
                    return handle.await;
                }
                Lookup::Joined { .. } => {
                    debug!(url = %url, "Joining in-flight GET");
                    match self.inner.race_cancellation(handle).await {
                        // The issuer was cancelled through its own token, not ours.
                        Err(ApiError::Cancelled) if !self.is_cancelled() => {
                            debug!(
                                url = %url,
                                "Joined GET was cancelled by its issuer, re-issuing"
                            );
                        }
                        result => return result,
                    }
                }
            }
        }
    }

    /// DELETE
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn del(&self, path: &str) -> ApiResult<Value> {
        let prepared = self.inner.prepare(HttpMethod::Delete, path, None)?;
        self.inner.execute(&prepared).await
    }

    /// POST; an absent payload is sent as `{}`
    #[instrument(skip(self, payload), fields(request_id = %Uuid::new_v4()))]
    pub async fn post(&self, path: &str, payload: Option<Value>) -> ApiResult<Value> {
        let prepared = self.inner.prepare(HttpMethod::Post, path, Some(payload))?;
        self.inner.execute(&prepared).await
    }

    /// PUT; an absent payload is sent as `{}`
    #[instrument(skip(self, payload), fields(request_id = %Uuid::new_v4()))]
    pub async fn put(&self, path: &str, payload: Option<Value>) -> ApiResult<Value> {
        let prepared = self.inner.prepare(HttpMethod::Put, path, Some(payload))?;
        self.inner.execute(&prepared).await
    }

    /// POST any serializable payload
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
    ) -> ApiResult<Value> {
        self.post(path, Some(serde_json::to_value(payload)?)).await
    }

    /// PUT any serializable payload
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &B,
    ) -> ApiResult<Value> {
        self.put(path, Some(serde_json::to_value(payload)?)).await
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("api_url", &self.inner.api_url)
            .field(
                "skip_response_error_handling",
                &self.inner.skip_response_error_handling,
            )
            .field("cancellation", &self.inner.cancellation)
            .field("pending", &self.inner.pending)
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn url(&self, path: &str) -> ApiResult<String> {
        if !path.starts_with('/') {
            return Err(ApiError::InvalidPath(path.to_string()));
        }
        Ok(format!("{}{path}", self.api_url))
    }

    /// `payload` is `None` for bodiless methods and `Some(None)` for an
    /// omitted POST/PUT payload.
    fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Option<Value>>,
    ) -> ApiResult<PreparedRequest> {
        let body = payload
            .map(|payload| {
                let payload = payload.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
                serde_json::to_string(&payload)
            })
            .transpose()?;

        Ok(PreparedRequest {
            method,
            url: self.url(path)?,
            body,
            authenticated: true,
        })
    }

    fn token_source(&self) -> TokenSource {
        self.token_source
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn token(&self) -> ApiResult<Option<String>> {
        self.token_source().resolve().await
    }

    /// Run a request to completion, racing it against cancellation
    async fn execute(&self, prepared: &PreparedRequest) -> ApiResult<Value> {
        self.race_cancellation(self.run(prepared)).await
    }

    async fn race_cancellation<F>(&self, work: F) -> ApiResult<Value>
    where
        F: Future<Output = ApiResult<Value>>,
    {
        let Some(token) = &self.cancellation else {
            return work.await;
        };

        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("Request cancelled");
                Err(ApiError::Cancelled)
            }
            result = work => result,
        }
    }

    async fn run(&self, prepared: &PreparedRequest) -> ApiResult<Value> {
        let response = self.send(prepared).await?;
        let response = self.screen(response, prepared).await?;
        Ok(response.decode())
    }

    /// Resolve the token and perform the round-trip, no screening
    pub(crate) async fn send(&self, prepared: &PreparedRequest) -> ApiResult<HttpResponse> {
        let token = if prepared.authenticated {
            self.token().await?
        } else {
            None
        };
        self.fetcher.fetch(prepared.to_request(token.as_deref())).await
    }

    async fn screen(
        &self,
        response: HttpResponse,
        prepared: &PreparedRequest,
    ) -> ApiResult<HttpResponse> {
        let mut state = Screening::Received(response);
        loop {
            state = match state {
                Screening::Received(response) if response.status == 401 => {
                    Screening::Unauthorized(response)
                }
                Screening::Received(response) => Screening::Authorized(response),
                Screening::Unauthorized(response) => {
                    debug!(url = %prepared.url, "Unauthorized response");
                    if let Some(handler) = &self.on_unauthorized {
                        handler();
                    }
                    Screening::Authorized(response)
                }
                Screening::Authorized(response) => {
                    if !self.skip_response_error_handling && !response.is_success() {
                        debug!(url = %prepared.url, status = response.status, "Request failed");
                        return Err(ApiError::Http(ErrorPayload::from_response(&response)));
                    }
                    Screening::Intercepting(response)
                }
                Screening::Intercepting(response) => match &self.interceptor {
                    Some(interceptor) => {
                        let replay = Replay { inner: self, prepared };
                        Screening::Resolved(interceptor.intercept(response, replay).await?)
                    }
                    None => Screening::Resolved(response),
                },
                Screening::Resolved(response) => {
                    debug!(url = %prepared.url, status = response.status, "Request completed");
                    return Ok(response);
                }
            };
        }
    }
}

impl PreparedRequest {
    fn to_request(&self, token: Option<&str>) -> HttpRequest {
        let mut headers = vec![
            (ACCEPT.to_string(), "application/json".to_string()),
            (CONTENT_TYPE.to_string(), "application/json".to_string()),
            (X_SIPGATE_CLIENT.to_string(), CLIENT_NAME.to_string()),
        ];
        if let Some(token) = token {
            headers.push((AUTHORIZATION.to_string(), format!("Bearer {token}")));
        }

        HttpRequest {
            method: self.method,
            url: self.url.clone(),
            headers,
            body: self.body.clone(),
        }
    }
}
