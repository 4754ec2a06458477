//! HTTP transport for the sipgate REST API
//!
//! This crate provides the request layer every sipgate API call goes through:
//!
//! - **Single-flight GETs**: concurrent identical GETs share one round-trip
//! - **Pluggable tokens**: static bearer token or an async provider asked on
//!   every request
//! - **Unauthorized hook**: a handler invoked for every 401 response
//! - **Status classification**: non-2xx responses fail with a diagnostic
//!   payload, or pass through when error handling is skipped
//! - **Lenient bodies**: JSON bodies are decoded, anything else comes back as
//!   text
//! - **Cancellation**: requests race a `CancellationToken`
//!
//! # Example
//!
//! ```rust,no_run
//! use sipgate_transport::{Transport, TransportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Transport::new(
//!         TransportConfig::new("https://api.sipgate.com/v2")
//!             .with_token("my-token")
//!             .on_unauthorized(|| eprintln!("session expired")),
//!     )?;
//!
//!     let balance = transport.get("/balance").await?;
//!     println!("{balance}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod interceptor;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod token;
pub mod transport;

pub use cache::PendingRequests;
pub use config::{TransportConfig, DEFAULT_API_URL};
pub use error::{ApiError, ApiResult, ErrorPayload};
pub use fetch::{Fetcher, ReqwestFetcher};
pub use http::{decode_body, HttpMethod, HttpRequest, HttpResponse};
pub use interceptor::{Replay, ResponseInterceptor, UnauthorizedHandler};
pub use token::{TokenProvider, TokenSource};
pub use tokio_util::sync::CancellationToken;
pub use transport::Transport;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::TransportConfig;
    pub use crate::error::{ApiError, ApiResult, ErrorPayload};
    pub use crate::token::{TokenProvider, TokenSource};
    pub use crate::transport::Transport;
    pub use tokio_util::sync::CancellationToken;
}
