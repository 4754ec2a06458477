//! Client for the sipgate REST API
//!
//! This crate exposes the sipgate v2 endpoint catalog on top of
//! [`sipgate_transport`]. Every operation maps its arguments to a path,
//! a verb and an optional JSON body, then hands the call to the transport,
//! which takes care of tokens, GET deduplication, error classification and
//! cancellation.
//!
//! # Example
//!
//! ```rust,no_run
//! use sipgate_api_client::{HistoryFilter, SipgateClient, TransportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SipgateClient::with_config(TransportConfig::default())?;
//!
//!     // Log in; the returned token is used for every following request
//!     client.sessions().create("user@example.com", "secret").await?;
//!
//!     let lines = client.phonelines().list("w0").await?;
//!     println!("{lines}");
//!
//!     let filter = HistoryFilter::new("p0", 20).with_types(["CALL"]);
//!     let history = client.history().list("w0", &filter).await?;
//!     println!("{history}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod endpoint;
pub mod endpoints;

pub use client::SipgateClient;
pub use endpoint::{Endpoint, Query};
pub use endpoints::{HistoryFilter, Restrictions};
pub use sipgate_transport::{
    ApiError, ApiResult, CancellationToken, ErrorPayload, Transport, TransportConfig,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::SipgateClient;
    pub use crate::endpoint::{Endpoint, Query};
    pub use crate::endpoints::{
        AccountApi, AppApi, ContactsApi, DevicesApi, FaxlinesApi, GroupsApi, HistoryApi,
        HistoryFilter, NotificationsApi, NumbersApi, PhonelinesApi, Restrictions, SessionsApi,
        SmsApi, UsersApi,
    };
    pub use sipgate_transport::prelude::*;
}
