//! App endpoints: translations, terms and conditions, links, events and the
//! welcome screen flag.

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// App API interface
#[derive(Clone)]
pub struct AppApi {
    client: SipgateClient,
}

impl AppApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// UI translations for `locale`, fetched without credentials
    ///
    /// GET /translations/{locale}
    pub async fn translations(&self, locale: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get_unauthenticated(format!("/translations/{locale}")))
            .await
    }

    /// Terms and conditions state
    pub async fn tacs(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/app/tacs")).await
    }

    /// Accept the terms and conditions
    pub async fn accept_tacs(&self) -> ApiResult<Value> {
        self.client
            .send(Endpoint::put("/app/tacs").json(json!({ "accepted": true })))
            .await
    }

    /// Links shown in the app
    pub async fn links(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/app/links")).await
    }

    /// Pending app events
    pub async fn events(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/app/events")).await
    }

    /// Dismiss an app event
    pub async fn delete_event(&self, event_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/app/events/{event_id}")))
            .await
    }

    /// Welcome screen flag
    pub async fn welcome(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/app/welcome")).await
    }

    /// Toggle the welcome screen
    pub async fn set_welcome(&self, enabled: bool) -> ApiResult<Value> {
        self.client
            .send(Endpoint::put("/app/welcome").json(json!({ "enabled": enabled })))
            .await
    }
}
