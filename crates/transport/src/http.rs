//! Plain-data HTTP request and response types
//!
//! The transport builds an [`HttpRequest`] per call and hands it to a
//! [`Fetcher`](crate::fetch::Fetcher), which answers with an [`HttpResponse`]
//! holding the complete body text. Keeping both sides as owned data lets the
//! network primitive be swapped (reqwest in production, scripted fakes in
//! tests) without touching the pipeline.

use serde_json::Value;
use std::fmt;

/// Value sent in the client identification header
pub const CLIENT_NAME: &str = "app.sipgate.com";

/// Client identification header
pub const X_SIPGATE_CLIENT: &str = "X-Sipgate-Client";

/// HTTP method for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// An outgoing request described as plain data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method
    pub method: HttpMethod,
    /// Absolute URL (base URL + path)
    pub url: String,
    /// Header name/value pairs in insertion order
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body for POST/PUT
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value, ignoring name case
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A received response with its complete body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Canonical reason phrase (may be empty)
    pub status_text: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Raw body text
    pub body: String,
}

impl HttpResponse {
    /// Whether the status lies in `[200, 300)`
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a header value, ignoring name case
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Decode the body, see [`decode_body`]
    #[must_use]
    pub fn decode(&self) -> Value {
        decode_body(&self.body)
    }
}

/// Decode a response body as JSON, falling back to the raw text.
///
/// A body that is not valid JSON comes back as `Value::String` holding the
/// text verbatim, so `"foo"` (JSON) and `foo` (text) decode identically.
#[must_use]
pub fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
