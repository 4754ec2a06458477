//! Main API client implementation

use crate::endpoint::Endpoint;
use crate::endpoints::{
    AccountApi, AppApi, ContactsApi, DevicesApi, FaxlinesApi, GroupsApi, HistoryApi,
    NotificationsApi, NumbersApi, PhonelinesApi, SessionsApi, SmsApi, UsersApi,
};
use serde_json::Value;
use sipgate_transport::{
    ApiResult, CancellationToken, HttpMethod, Transport, TransportConfig,
};
use tracing::debug;

/// sipgate API client
///
/// A thin catalog over [`Transport`]: each resource accessor returns a
/// small API struct whose methods map their arguments to an [`Endpoint`]
/// and dispatch it. Errors from the transport pass through unchanged.
#[derive(Clone, Debug)]
pub struct SipgateClient {
    transport: Transport,
}

impl SipgateClient {
    /// Create a new client with configuration from environment
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::from_transport(Transport::from_env()?))
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: TransportConfig) -> ApiResult<Self> {
        Ok(Self::from_transport(Transport::new(config)?))
    }

    /// Wrap an existing transport
    #[must_use]
    pub fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// Underlying transport
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Derive a client whose requests are governed by `token`
    #[must_use]
    pub fn cancellable(&self, token: CancellationToken) -> Self {
        Self::from_transport(self.transport.cancellable(token))
    }

    /// Dispatch an endpoint through the transport
    pub async fn send(&self, endpoint: Endpoint) -> ApiResult<Value> {
        debug!(method = %endpoint.method, path = %endpoint.path, "Dispatching endpoint");
        let Endpoint {
            method,
            path,
            body,
            authenticated,
        } = endpoint;

        match method {
            HttpMethod::Get => self.transport.get_with(&path, authenticated).await,
            HttpMethod::Delete => self.transport.del(&path).await,
            HttpMethod::Post => self.transport.post(&path, body).await,
            HttpMethod::Put => self.transport.put(&path, body).await,
        }
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access session endpoints (login, calls, fax, SMS sending)
    #[must_use]
    pub fn sessions(&self) -> SessionsApi {
        SessionsApi::new(self.clone())
    }

    /// Access app endpoints (translations, terms, links, events)
    #[must_use]
    pub fn app(&self) -> AppApi {
        AppApi::new(self.clone())
    }

    /// Access account and billing endpoints
    #[must_use]
    pub fn account(&self) -> AccountApi {
        AccountApi::new(self.clone())
    }

    /// Access user endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access device endpoints
    #[must_use]
    pub fn devices(&self) -> DevicesApi {
        DevicesApi::new(self.clone())
    }

    /// Access phoneline endpoints
    #[must_use]
    pub fn phonelines(&self) -> PhonelinesApi {
        PhonelinesApi::new(self.clone())
    }

    /// Access faxline endpoints
    #[must_use]
    pub fn faxlines(&self) -> FaxlinesApi {
        FaxlinesApi::new(self.clone())
    }

    /// Access group endpoints
    #[must_use]
    pub fn groups(&self) -> GroupsApi {
        GroupsApi::new(self.clone())
    }

    /// Access number and porting endpoints
    #[must_use]
    pub fn numbers(&self) -> NumbersApi {
        NumbersApi::new(self.clone())
    }

    /// Access SMS extension endpoints
    #[must_use]
    pub fn sms(&self) -> SmsApi {
        SmsApi::new(self.clone())
    }

    /// Access contact endpoints
    #[must_use]
    pub fn contacts(&self) -> ContactsApi {
        ContactsApi::new(self.clone())
    }

    /// Access call history endpoints
    #[must_use]
    pub fn history(&self) -> HistoryApi {
        HistoryApi::new(self.clone())
    }

    /// Access notification endpoints
    #[must_use]
    pub fn notifications(&self) -> NotificationsApi {
        NotificationsApi::new(self.clone())
    }
}
