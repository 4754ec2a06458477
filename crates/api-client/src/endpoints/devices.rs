//! Device endpoints
//!
//! Per-device settings live under `/devices/{deviceId}`; creation, listing
//! and SIM management are scoped to a user (`/{userId}/devices`).

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Devices API interface
#[derive(Clone)]
pub struct DevicesApi {
    client: SipgateClient,
}

impl DevicesApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// Devices of a user
    pub async fn list(&self, user_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::get(format!("/{user_id}/devices"))).await
    }

    /// A single device
    pub async fn get(&self, device_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::get(format!("/devices/{device_id}"))).await
    }

    /// Create a device of the given type for a user
    pub async fn create(&self, user_id: &str, device_type: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post(format!("/{user_id}/devices"))
                    .json(json!({ "type": device_type })),
            )
            .await
    }

    /// Delete a device
    pub async fn delete(&self, device_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::delete(format!("/devices/{device_id}"))).await
    }

    /// Do-not-disturb and emergency address
    pub async fn set_settings(
        &self,
        device_id: &str,
        dnd: bool,
        emergency_address_id: Option<&str>,
    ) -> ApiResult<Value> {
        self.client
            .send(Endpoint::put(format!("/devices/{device_id}")).json(json!({
                "dnd": dnd,
                "emergencyAddressId": emergency_address_id,
            })))
            .await
    }

    /// Rename a device
    pub async fn set_alias(&self, device_id: &str, alias: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/devices/{device_id}/alias"))
                    .json(json!({ "value": alias })),
            )
            .await
    }

    /// Generate new SIP credentials
    pub async fn reset_password(&self, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::post(format!("/devices/{device_id}/credentials/password")))
            .await
    }

    /// Outgoing caller id
    pub async fn caller_id(&self, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/devices/{device_id}/callerid")))
            .await
    }

    /// Set the outgoing caller id
    pub async fn set_caller_id(&self, device_id: &str, caller_id: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/devices/{device_id}/callerid"))
                    .json(json!({ "value": caller_id })),
            )
            .await
    }

    /// Tariff announcement flag
    pub async fn tariff_announcement(&self, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/devices/{device_id}/tariffannouncement")))
            .await
    }

    /// Toggle the tariff announcement
    pub async fn set_tariff_announcement(
        &self,
        device_id: &str,
        enabled: bool,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/devices/{device_id}/tariffannouncement"))
                    .json(json!({ "enabled": enabled })),
            )
            .await
    }

    /// Local dialing prefix
    pub async fn local_prefix(&self, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/devices/{device_id}/localprefix")))
            .await
    }

    /// Set the local dialing prefix
    pub async fn set_local_prefix(
        &self,
        device_id: &str,
        local_prefix: &str,
        active: bool,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/devices/{device_id}/localprefix"))
                    .json(json!({ "value": local_prefix, "active": active })),
            )
            .await
    }

    /// Single-row display flag
    pub async fn single_row_display(&self, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/devices/{device_id}/singlerowdisplay")))
            .await
    }

    /// Toggle the single-row display
    pub async fn set_single_row_display(&self, device_id: &str, enabled: bool) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/devices/{device_id}/singlerowdisplay"))
                    .json(json!({ "enabled": enabled })),
            )
            .await
    }

    /// Bind a SIM card to a mobile device
    pub async fn activate_sim(
        &self,
        user_id: &str,
        device_id: &str,
        sim_id: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post(format!("/{user_id}/devices/{device_id}/sim"))
                    .json(json!({ "simId": sim_id })),
            )
            .await
    }

    /// Unbind the SIM card
    pub async fn deactivate_sim(&self, user_id: &str, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/{user_id}/devices/{device_id}/sim")))
            .await
    }

    /// Order a SIM card to an address
    pub async fn order_sim(
        &self,
        user_id: &str,
        device_id: &str,
        address_id: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post(format!("/{user_id}/devices/{device_id}/sim/orders"))
                    .json(json!({ "addressId": address_id })),
            )
            .await
    }

    /// Mobile data contingents
    pub async fn contingents(&self, user_id: &str, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/{user_id}/devices/{device_id}/contingents")))
            .await
    }
}
