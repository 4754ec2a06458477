//! Bearer token sources

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::ApiResult;

/// Supplies the bearer token for authenticated requests.
///
/// Implemented for any `Fn() -> impl Future<Output = ApiResult<Option<String>>>`,
/// so an async closure that reads or refreshes a token can be plugged in
/// directly. `Ok(None)` means "send the request without credentials".
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Resolve the token for the next request
    async fn token(&self) -> ApiResult<Option<String>>;
}

#[async_trait]
impl<F, Fut> TokenProvider for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ApiResult<Option<String>>> + Send + 'static,
{
    async fn token(&self) -> ApiResult<Option<String>> {
        (self)().await
    }
}

/// Where the transport gets its bearer token from
#[derive(Clone, Default)]
pub enum TokenSource {
    /// No credentials
    #[default]
    None,
    /// A fixed token
    Static(String),
    /// Asked on every request, never cached
    Provider(Arc<dyn TokenProvider>),
}

impl TokenSource {
    /// Build a source from an optional fixed token
    #[must_use]
    pub fn from_token(token: Option<String>) -> Self {
        token.map_or(Self::None, Self::Static)
    }

    /// Build a source from a provider
    pub fn provider(provider: impl TokenProvider + 'static) -> Self {
        Self::Provider(Arc::new(provider))
    }

    /// Resolve the current token. Empty tokens count as absent.
    pub async fn resolve(&self) -> ApiResult<Option<String>> {
        let token = match self {
            Self::None => None,
            Self::Static(token) => Some(token.clone()),
            Self::Provider(provider) => provider.token().await?,
        };
        Ok(token.filter(|t| !t.is_empty()))
    }
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Static(_) => f.write_str("Static(<redacted>)"),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_static_token() {
        let source = TokenSource::from_token(Some("tok".to_string()));
        assert_eq!(source.resolve().await.unwrap().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_empty_token_is_absent() {
        let source = TokenSource::Static(String::new());
        assert_eq!(source.resolve().await.unwrap(), None);
        assert_eq!(TokenSource::None.resolve().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_provider_called_on_every_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = TokenSource::provider(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, ApiError>(Some(format!("tok-{n}"))) }
        });

        assert_eq!(source.resolve().await.unwrap().as_deref(), Some("tok-0"));
        assert_eq!(source.resolve().await.unwrap().as_deref(), Some("tok-1"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let source = TokenSource::provider(|| async {
            Err::<Option<String>, _>(ApiError::token("storage locked"))
        });
        let err = source.resolve().await.unwrap_err();
        assert!(matches!(err, ApiError::Token(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let source = TokenSource::Static("secret".to_string());
        assert!(!format!("{source:?}").contains("secret"));
    }
}
