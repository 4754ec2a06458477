//! Number endpoints: routing, porting and quick-dial numbers

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Numbers API interface
#[derive(Clone)]
pub struct NumbersApi {
    client: SipgateClient,
}

impl NumbersApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// Numbers of a user
    pub async fn list(&self, user_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::get(format!("/{user_id}/numbers"))).await
    }

    /// Route a number to an endpoint (phoneline, faxline, group...)
    pub async fn set_routing(&self, number_id: &str, endpoint_id: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/numbers/{number_id}"))
                    .json(json!({ "endpointId": endpoint_id })),
            )
            .await
    }

    /// Route a number and set its porting and quick-dial flags
    pub async fn set_settings(
        &self,
        number_id: &str,
        endpoint_id: &str,
        release_for_mnp: bool,
        quick_dial: bool,
    ) -> ApiResult<Value> {
        self.client
            .send(Endpoint::put(format!("/numbers/{number_id}")).json(json!({
                "endpointId": endpoint_id,
                "releaseForMnp": release_for_mnp,
                "quickDial": quick_dial,
            })))
            .await
    }

    /// Number portings in progress
    pub async fn portings(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/portings")).await
    }

    /// Revoke a porting
    pub async fn revoke_porting(&self, porting_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/portings/{porting_id}")))
            .await
    }

    /// Check whether a quick-dial number is available
    pub async fn validate_quick_dial(&self, quick_dial_number: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/numbers/quickdial/validation/{quick_dial_number}")))
            .await
    }

    /// Create a quick-dial number for a user
    pub async fn create_quick_dial(&self, user_id: &str, number: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post("/numbers/quickdial")
                    .json(json!({ "userId": user_id, "number": number })),
            )
            .await
    }

    /// Change a quick-dial number
    pub async fn set_quick_dial(
        &self,
        user_id: &str,
        number_id: &str,
        number: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/numbers/quickdial/{number_id}"))
                    .json(json!({ "userId": user_id, "number": number })),
            )
            .await
    }

    /// Delete a quick-dial number
    pub async fn delete_quick_dial(&self, number_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/numbers/quickdial/{number_id}")))
            .await
    }
}
