//! Scripted [`Fetcher`] for tests
//!
//! Available with the `test-util` feature. Routes match on method plus the
//! URL's path and query; replies registered for the same route are consumed
//! in order and the last one repeats.
//!
//! ```rust,ignore
//! let fetcher = Arc::new(MockFetcher::new().reply(
//!     HttpMethod::Get,
//!     "/users/1",
//!     MockReply::json(200, json!({"id": "1"})),
//! ));
//! let transport = Transport::from_parts(config, fetcher.clone(), PendingRequests::new())?;
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{ApiError, ApiResult};
use crate::fetch::Fetcher;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A complete response
    Response(HttpResponse),
    /// Fail without a response
    NetworkError(String),
    /// Never answer
    Stall,
}

impl MockReply {
    /// JSON response
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self::text(status, &body.to_string())
    }

    /// Response with a raw body
    #[must_use]
    pub fn text(status: u16, body: &str) -> Self {
        Self::Response(HttpResponse {
            status,
            status_text: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default()
                .to_string(),
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    /// Network-level failure
    #[must_use]
    pub fn network_error(message: &str) -> Self {
        Self::NetworkError(message.to_string())
    }

    /// Add a response header (no-op for non-response replies)
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let Self::Response(ref mut response) = self {
            response.headers.push((name.to_string(), value.to_string()));
        }
        self
    }
}

struct Route {
    method: HttpMethod,
    path: String,
    replies: VecDeque<MockReply>,
}

/// [`Fetcher`] that answers from a script and records every request
pub struct MockFetcher {
    routes: Mutex<Vec<Route>>,
    fallback: MockReply,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            fallback: MockReply::json(404, json!({ "message": "no mock route" })),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockFetcher {
    /// Create a mock that answers 404 to everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method` + `path` (path and query, e.g. `/users/1`)
    #[must_use]
    pub fn reply(self, method: HttpMethod, path: &str, reply: MockReply) -> Self {
        {
            let mut routes = lock(&self.routes);
            match routes
                .iter_mut()
                .find(|route| route.method == method && route.path == path)
            {
                Some(route) => route.replies.push_back(reply),
                None => routes.push(Route {
                    method,
                    path: path.to_string(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    /// Reply used when no route matches
    #[must_use]
    pub fn fallback(mut self, reply: MockReply) -> Self {
        self.fallback = reply;
        self
    }

    /// All requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Most recent request
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Number of requests received for `method` + `path`
    #[must_use]
    pub fn calls(&self, method: HttpMethod, path: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|request| request.method == method && path_of(&request.url) == path)
            .count()
    }

    fn next_reply(&self, request: &HttpRequest) -> MockReply {
        let path = path_of(&request.url);
        let mut routes = lock(&self.routes);
        let Some(route) = routes
            .iter_mut()
            .find(|route| route.method == request.method && route.path == path)
        else {
            return self.fallback.clone();
        };

        if route.replies.len() > 1 {
            route.replies.pop_front().unwrap_or(MockReply::Stall)
        } else {
            route.replies.front().cloned().unwrap_or(MockReply::Stall)
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let reply = self.next_reply(&request);
        lock(&self.requests).push(request);

        // Let concurrently started callers reach the dedup cache first.
        tokio::task::yield_now().await;

        match reply {
            MockReply::Response(response) => Ok(response),
            MockReply::NetworkError(message) => Err(ApiError::network(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                message,
            ))),
            MockReply::Stall => std::future::pending().await,
        }
    }
}

/// Path and query of an absolute URL
fn path_of(url: &str) -> &str {
    let after_scheme = url.find("://").map_or(0, |i| i + 3);
    url[after_scheme..]
        .find('/')
        .map_or("/", |i| &url[after_scheme + i..])
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
