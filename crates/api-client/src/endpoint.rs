//! Endpoint descriptions and query-string assembly
//!
//! Every catalog operation is a pure mapping from its arguments to an
//! [`Endpoint`]; [`SipgateClient::send`](crate::SipgateClient::send) is the
//! only place an endpoint turns into a transport call.

use serde_json::Value;
use sipgate_transport::HttpMethod;
use std::fmt::{self, Display};

/// One API call: verb, path (with query) and optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the API URL, starting with `/`
    pub path: String,
    /// JSON body for POST/PUT (`None` sends `{}`)
    pub body: Option<Value>,
    pub(crate) authenticated: bool,
}

impl Endpoint {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            authenticated: true,
        }
    }

    /// Authenticated GET
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// GET without credentials
    pub fn get_unauthenticated(path: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            ..Self::get(path)
        }
    }

    /// DELETE
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// POST without a payload
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// PUT without a payload
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Attach a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether the bearer token is attached.
    ///
    /// Only [`Endpoint::get_unauthenticated`] produces `false`; every other
    /// call carries the token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Query-string builder.
///
/// Values are interpolated verbatim. Repeated parameters keep their input
/// order: `types=a&types=b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Create an empty query
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append `key=value` when a value is present
    #[must_use]
    pub fn param_opt(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Append one `key=value` pair per item, in order
    #[must_use]
    pub fn repeated<I>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for value in values {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Append a pre-encoded fragment such as `a=1&b=2`
    #[must_use]
    pub fn raw(mut self, fragment: &str) -> Self {
        for pair in fragment.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Whether no parameter was added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append this query to `path` (`path?query`, or `path` alone when empty)
    #[must_use]
    pub fn to_path(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{self}")
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_constructors() {
        let endpoint = Endpoint::put("/devices/e0").json(json!({ "dnd": true }));
        assert_eq!(endpoint.method, HttpMethod::Put);
        assert_eq!(endpoint.body, Some(json!({ "dnd": true })));
        assert!(endpoint.is_authenticated());

        let endpoint = Endpoint::get_unauthenticated("/translations/de");
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert!(!endpoint.is_authenticated());
    }

    #[test]
    fn test_only_unauthenticated_get_drops_token() {
        for endpoint in [
            Endpoint::get("/balance"),
            Endpoint::delete("/contacts"),
            Endpoint::post("/sessions/calls").json(json!({})),
            Endpoint::put("/app/tacs"),
        ] {
            assert!(endpoint.is_authenticated(), "{} {}", endpoint.method, endpoint.path);
        }
        assert!(!Endpoint::get_unauthenticated("/translations/de").is_authenticated());
    }

    #[test]
    fn test_query_keeps_order() {
        let query = Query::new()
            .param("phonelineId", "p0")
            .param("limit", 50)
            .repeated("types", ["CALL", "FAX"])
            .repeated("directions", ["INCOMING"]);
        assert_eq!(
            query.to_string(),
            "phonelineId=p0&limit=50&types=CALL&types=FAX&directions=INCOMING"
        );
    }

    #[test]
    fn test_empty_query_leaves_path_alone() {
        assert_eq!(Query::new().to_path("/groups"), "/groups");
        assert_eq!(
            Query::new().param_opt("userId", Some("w0")).to_path("/groups"),
            "/groups?userId=w0"
        );
        assert_eq!(
            Query::new().param_opt("userId", None::<&str>).to_path("/groups"),
            "/groups"
        );
    }

    #[test]
    fn test_raw_fragment() {
        let query = Query::new().param("userId", "w0").raw("restriction=CAN_USE_FAX&x=");
        assert_eq!(query.to_string(), "userId=w0&restriction=CAN_USE_FAX&x=");
    }

    proptest! {
        #[test]
        fn test_repeated_params_preserve_input_order(
            values in proptest::collection::vec("[A-Z_]{1,12}", 0..8)
        ) {
            let query = Query::new().repeated("types", &values);
            let expected: Vec<String> = values.iter().map(|v| format!("types={v}")).collect();
            prop_assert_eq!(query.to_string(), expected.join("&"));
        }
    }
}
