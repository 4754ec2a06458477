//! Configuration for the transport
//!
//! Plain settings can come from the environment; hooks (token provider,
//! unauthorized handler, response interceptor, cancellation) are attached
//! with the builder-style methods.

use std::env;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::{ApiError, ApiResult};
use crate::interceptor::{ResponseInterceptor, UnauthorizedHandler};
use crate::token::{TokenProvider, TokenSource};

/// Default production API URL
pub const DEFAULT_API_URL: &str = "https://api.sipgate.com/v2";

/// Transport configuration
#[derive(Clone)]
pub struct TransportConfig {
    /// Base URL every request path is appended to
    pub api_url: String,
    /// Where bearer tokens come from
    pub token_source: TokenSource,
    /// Called whenever a response has status 401
    pub on_unauthorized: Option<UnauthorizedHandler>,
    /// Sees every response that passed classification
    pub interceptor: Option<Arc<dyn ResponseInterceptor>>,
    /// Pass non-2xx responses through instead of failing
    pub skip_response_error_handling: bool,
    /// Aborts in-flight requests when triggered
    pub cancellation: Option<CancellationToken>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_source: TokenSource::None,
            on_unauthorized: None,
            interceptor: None,
            skip_response_error_handling: false,
            cancellation: None,
        }
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("api_url", &self.api_url)
            .field("token_source", &self.token_source)
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .field("interceptor", &self.interceptor.is_some())
            .field(
                "skip_response_error_handling",
                &self.skip_response_error_handling,
            )
            .field("cancellation", &self.cancellation)
            .finish()
    }
}

impl TransportConfig {
    /// Create configuration for an API URL
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::default().with_api_url(api_url)
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SIPGATE_API_URL`: Base URL (defaults to the production API)
    /// - `SIPGATE_TOKEN`: Static bearer token
    /// - `SIPGATE_SKIP_RESPONSE_ERROR_HANDLING`: `1`/`true` to pass non-2xx
    ///   responses through
    pub fn from_env() -> ApiResult<Self> {
        let api_url = env::var("SIPGATE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token = env::var("SIPGATE_TOKEN").ok();
        let skip_response_error_handling = match env::var("SIPGATE_SKIP_RESPONSE_ERROR_HANDLING") {
            Ok(value) => parse_flag(&value).ok_or_else(|| {
                ApiError::config(format!(
                    "SIPGATE_SKIP_RESPONSE_ERROR_HANDLING must be a boolean, got {value:?}"
                ))
            })?,
            Err(_) => false,
        };

        let config = Self::new(api_url)
            .with_token_source(TokenSource::from_token(token))
            .skip_response_error_handling(skip_response_error_handling);
        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set the API URL (trailing `/` is trimmed)
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder-style method to set a static token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token_source = TokenSource::Static(token.into());
        self
    }

    /// Builder-style method to set a token provider
    #[must_use]
    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.token_source = TokenSource::provider(provider);
        self
    }

    /// Builder-style method to set the token source
    #[must_use]
    pub fn with_token_source(mut self, source: TokenSource) -> Self {
        self.token_source = source;
        self
    }

    /// Builder-style method to set the unauthorized handler
    #[must_use]
    pub fn on_unauthorized(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    /// Builder-style method to set the response interceptor
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Builder-style method to toggle pass-through of non-2xx responses
    #[must_use]
    pub fn skip_response_error_handling(mut self, skip: bool) -> Self {
        self.skip_response_error_handling = skip;
        self
    }

    /// Builder-style method to bind a cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.api_url.is_empty() {
            return Err(ApiError::config("api_url cannot be empty"));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ApiError::config("api_url must start with http:// or https://"));
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(matches!(config.token_source, TokenSource::None));
        assert!(!config.skip_response_error_handling);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = TransportConfig::new("https://api.example.com/");
        assert_eq!(config.api_url, "https://api.example.com");
    }

    #[test]
    fn test_builder_pattern() {
        let config = TransportConfig::new("https://api.example.com")
            .with_token("tok")
            .skip_response_error_handling(true)
            .on_unauthorized(|| {});

        assert!(matches!(config.token_source, TokenSource::Static(ref t) if t == "tok"));
        assert!(config.skip_response_error_handling);
        assert!(config.on_unauthorized.is_some());
    }

    #[test]
    fn test_validation() {
        assert!(TransportConfig::new("").validate().is_err());
        assert!(TransportConfig::new("ftp://api.example.com").validate().is_err());
        assert!(TransportConfig::new("http://localhost:3000").validate().is_ok());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_debug_hides_token() {
        let config = TransportConfig::default().with_token("secret");
        assert!(!format!("{config:?}").contains("secret"));
    }
}
