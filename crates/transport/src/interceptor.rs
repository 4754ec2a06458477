//! Hooks into the response pipeline

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::http::{HttpMethod, HttpResponse};
use crate::transport::{Inner, PreparedRequest};

/// Invoked for every response with status 401.
///
/// Fire-and-forget: the handler cannot change how the current request
/// resolves. Handlers that need to do async work should spawn it.
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// Sees every response that passed status classification.
///
/// The returned response replaces the original one; its body is what the
/// caller receives. An interceptor can re-run the request through
/// [`Replay::send`], e.g. after refreshing credentials out of band.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// Inspect or replace a response
    async fn intercept(
        &self,
        response: HttpResponse,
        replay: Replay<'_>,
    ) -> ApiResult<HttpResponse>;
}

/// Handle for re-issuing the request an intercepted response belongs to
pub struct Replay<'a> {
    pub(crate) inner: &'a Inner,
    pub(crate) prepared: &'a PreparedRequest,
}

impl Replay<'_> {
    /// Method of the original request
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.prepared.method
    }

    /// URL of the original request
    #[must_use]
    pub fn url(&self) -> &str {
        &self.prepared.url
    }

    /// Send the identical request again with a freshly resolved token.
    ///
    /// The raw response is returned without 401 handling or classification.
    pub async fn send(&self) -> ApiResult<HttpResponse> {
        self.inner.send(self.prepared).await
    }
}
