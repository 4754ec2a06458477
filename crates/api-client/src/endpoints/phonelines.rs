//! Phoneline endpoints
//!
//! Everything below `/{userId}/phonelines`: the lines themselves, their
//! devices, forwardings, numbers, voicemail boxes and greetings, call
//! screening flags and the sipgate.io webhook settings.

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Phonelines API interface
#[derive(Clone)]
pub struct PhonelinesApi {
    client: SipgateClient,
}

impl PhonelinesApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    async fn get(&self, path: String) -> ApiResult<Value> {
        self.client.send(Endpoint::get(path)).await
    }

    async fn put(&self, path: String, body: Value) -> ApiResult<Value> {
        self.client.send(Endpoint::put(path).json(body)).await
    }

    // -------------------------------------------------------------------------
    // Lines
    // -------------------------------------------------------------------------

    /// Phonelines of a user
    pub async fn list(&self, user_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines")).await
    }

    /// Create a phoneline
    pub async fn create(&self, user_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::post(format!("/{user_id}/phonelines")))
            .await
    }

    /// Delete a phoneline
    pub async fn delete(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/{user_id}/phonelines/{phoneline_id}")))
            .await
    }

    /// Rename a phoneline
    pub async fn set_alias(
        &self,
        user_id: &str,
        phoneline_id: &str,
        alias: &str,
    ) -> ApiResult<Value> {
        self.put(
            format!("/{user_id}/phonelines/{phoneline_id}"),
            json!({ "alias": alias }),
        )
        .await
    }

    /// Numbers routed to a phoneline
    pub async fn numbers(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/numbers")).await
    }

    // -------------------------------------------------------------------------
    // Devices
    // -------------------------------------------------------------------------

    /// Devices ringing on a phoneline
    pub async fn devices(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/devices")).await
    }

    /// Attach a device to a phoneline
    pub async fn add_device(
        &self,
        user_id: &str,
        phoneline_id: &str,
        device_id: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post(format!("/{user_id}/phonelines/{phoneline_id}/devices"))
                    .json(json!({ "deviceId": device_id })),
            )
            .await
    }

    /// Detach a device from a phoneline
    pub async fn remove_device(
        &self,
        user_id: &str,
        phoneline_id: &str,
        device_id: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!(
                "/{user_id}/phonelines/{phoneline_id}/devices/{device_id}"
            )))
            .await
    }

    // -------------------------------------------------------------------------
    // Forwardings
    // -------------------------------------------------------------------------

    /// Call forwardings
    pub async fn forwardings(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/forwardings")).await
    }

    /// Replace the call forwardings
    pub async fn set_forwardings(
        &self,
        user_id: &str,
        phoneline_id: &str,
        forwardings: Value,
    ) -> ApiResult<Value> {
        self.put(
            format!("/{user_id}/phonelines/{phoneline_id}/forwardings"),
            json!({ "forwardings": forwardings }),
        )
        .await
    }

    /// Parallel forwardings
    pub async fn parallel_forwardings(
        &self,
        user_id: &str,
        phoneline_id: &str,
    ) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/parallelforwardings"))
            .await
    }

    /// Create an active parallel forwarding
    pub async fn create_parallel_forwarding(
        &self,
        user_id: &str,
        phoneline_id: &str,
        alias: &str,
        destination: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post(format!("/{user_id}/phonelines/{phoneline_id}/parallelforwardings"))
                    .json(json!({ "alias": alias, "destination": destination, "active": true })),
            )
            .await
    }

    /// Update a parallel forwarding; `forwarding` is sent as the body
    pub async fn set_parallel_forwarding(
        &self,
        user_id: &str,
        phoneline_id: &str,
        forwarding_id: &str,
        forwarding: Value,
    ) -> ApiResult<Value> {
        self.put(
            format!("/{user_id}/phonelines/{phoneline_id}/parallelforwardings/{forwarding_id}"),
            forwarding,
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Voicemail
    // -------------------------------------------------------------------------

    /// Voicemail boxes
    pub async fn voicemails(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/voicemails")).await
    }

    /// Configure a voicemail box
    pub async fn set_voicemail(
        &self,
        user_id: &str,
        phoneline_id: &str,
        voicemail_id: &str,
        active: bool,
        timeout: u32,
        transcription: bool,
    ) -> ApiResult<Value> {
        self.put(
            format!("/{user_id}/phonelines/{phoneline_id}/voicemails/{voicemail_id}"),
            json!({ "timeout": timeout, "active": active, "transcription": transcription }),
        )
        .await
    }

    /// Greetings of a voicemail box
    pub async fn greetings(
        &self,
        user_id: &str,
        phoneline_id: &str,
        voicemail_id: &str,
    ) -> ApiResult<Value> {
        self.get(format!(
            "/{user_id}/phonelines/{phoneline_id}/voicemails/{voicemail_id}/greetings"
        ))
        .await
    }

    /// Upload a greeting
    pub async fn create_greeting(
        &self,
        user_id: &str,
        phoneline_id: &str,
        voicemail_id: &str,
        filename: &str,
        base64_content: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post(format!(
                    "/{user_id}/phonelines/{phoneline_id}/voicemails/{voicemail_id}/greetings"
                ))
                .json(json!({ "filename": filename, "base64Content": base64_content })),
            )
            .await
    }

    /// Make a greeting the active one
    pub async fn activate_greeting(
        &self,
        user_id: &str,
        phoneline_id: &str,
        voicemail_id: &str,
        greeting_id: &str,
    ) -> ApiResult<Value> {
        let voicemail = format!("/{user_id}/phonelines/{phoneline_id}/voicemails/{voicemail_id}");
        self.put(format!("{voicemail}/greetings/{greeting_id}"), json!({ "active": true }))
            .await
    }

    /// Delete a greeting
    pub async fn delete_greeting(
        &self,
        user_id: &str,
        phoneline_id: &str,
        voicemail_id: &str,
        greeting_id: &str,
    ) -> ApiResult<Value> {
        let voicemail = format!("/{user_id}/phonelines/{phoneline_id}/voicemails/{voicemail_id}");
        self.client
            .send(Endpoint::delete(format!("{voicemail}/greetings/{greeting_id}")))
            .await
    }

    // -------------------------------------------------------------------------
    // Call screening
    // -------------------------------------------------------------------------

    /// Anonymous call blocking
    pub async fn block_anonymous(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/blockanonymous"))
            .await
    }

    /// Configure anonymous call blocking
    pub async fn set_block_anonymous(
        &self,
        user_id: &str,
        phoneline_id: &str,
        enabled: bool,
        target: &str,
    ) -> ApiResult<Value> {
        self.put(
            format!("/{user_id}/phonelines/{phoneline_id}/blockanonymous"),
            json!({ "enabled": enabled, "target": target }),
        )
        .await
    }

    /// Busy-on-busy flag
    pub async fn busy_on_busy(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/busyonbusy")).await
    }

    /// Toggle busy-on-busy
    pub async fn set_busy_on_busy(
        &self,
        user_id: &str,
        phoneline_id: &str,
        enabled: bool,
    ) -> ApiResult<Value> {
        self.put(
            format!("/{user_id}/phonelines/{phoneline_id}/busyonbusy"),
            json!({ "enabled": enabled }),
        )
        .await
    }

    // -------------------------------------------------------------------------
    // sipgate.io
    // -------------------------------------------------------------------------

    /// Webhook settings
    pub async fn sipgate_io(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/sipgateio")).await
    }

    /// Replace the webhook settings; `settings` is sent as the body
    pub async fn set_sipgate_io(
        &self,
        user_id: &str,
        phoneline_id: &str,
        settings: Value,
    ) -> ApiResult<Value> {
        self.put(format!("/{user_id}/phonelines/{phoneline_id}/sipgateio"), settings)
            .await
    }

    /// Webhook delivery log
    pub async fn sipgate_io_log(&self, user_id: &str, phoneline_id: &str) -> ApiResult<Value> {
        self.get(format!("/{user_id}/phonelines/{phoneline_id}/sipgateio/log"))
            .await
    }
}
