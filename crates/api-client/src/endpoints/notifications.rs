//! Notification endpoints
//!
//! A notification forwards an event (voicemail, fax, call, SMS) to an email
//! address or a phone number. Every creation endpoint lives below
//! `/{userId}/notifications/{event}/{channel}`.

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Notifications API interface
#[derive(Clone)]
pub struct NotificationsApi {
    client: SipgateClient,
}

impl NotificationsApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    async fn create(&self, user_id: &str, kind: &str, body: Value) -> ApiResult<Value> {
        self.client
            .send(Endpoint::post(format!("/{user_id}/notifications/{kind}")).json(body))
            .await
    }

    /// Notifications of a user
    pub async fn list(&self, user_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/{user_id}/notifications")))
            .await
    }

    /// Delete a notification
    pub async fn delete(&self, user_id: &str, notification_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/{user_id}/notifications/{notification_id}")))
            .await
    }

    /// Email on new voicemail
    pub async fn create_voicemail_email(
        &self,
        user_id: &str,
        voicemail_id: &str,
        email: &str,
    ) -> ApiResult<Value> {
        self.create(
            user_id,
            "voicemail/email",
            json!({ "voicemailId": voicemail_id, "email": email }),
        )
        .await
    }

    /// SMS on new voicemail
    pub async fn create_voicemail_sms(
        &self,
        user_id: &str,
        voicemail_id: &str,
        number: &str,
    ) -> ApiResult<Value> {
        self.create(
            user_id,
            "voicemail/sms",
            json!({ "voicemailId": voicemail_id, "number": number }),
        )
        .await
    }

    /// Email on fax traffic
    pub async fn create_fax_email(
        &self,
        user_id: &str,
        faxline_id: &str,
        email: &str,
        direction: &str,
    ) -> ApiResult<Value> {
        self.create(
            user_id,
            "fax/email",
            json!({ "faxlineId": faxline_id, "email": email, "direction": direction }),
        )
        .await
    }

    /// SMS on fax traffic
    pub async fn create_fax_sms(
        &self,
        user_id: &str,
        faxline_id: &str,
        number: &str,
        direction: &str,
    ) -> ApiResult<Value> {
        self.create(
            user_id,
            "fax/sms",
            json!({ "faxlineId": faxline_id, "number": number, "direction": direction }),
        )
        .await
    }

    /// Email on calls
    pub async fn create_call_email(
        &self,
        user_id: &str,
        endpoint_id: &str,
        email: &str,
        direction: &str,
        cause: &str,
    ) -> ApiResult<Value> {
        self.create(
            user_id,
            "call/email",
            json!({
                "endpointId": endpoint_id,
                "email": email,
                "direction": direction,
                "cause": cause,
            }),
        )
        .await
    }

    /// SMS on calls
    pub async fn create_call_sms(
        &self,
        user_id: &str,
        endpoint_id: &str,
        number: &str,
        direction: &str,
        cause: &str,
    ) -> ApiResult<Value> {
        self.create(
            user_id,
            "call/sms",
            json!({
                "endpointId": endpoint_id,
                "number": number,
                "direction": direction,
                "cause": cause,
            }),
        )
        .await
    }

    /// Emailed send report for outgoing faxes
    pub async fn create_fax_report(
        &self,
        user_id: &str,
        faxline_id: &str,
        email: &str,
    ) -> ApiResult<Value> {
        self.create(
            user_id,
            "fax/report",
            json!({ "faxlineId": faxline_id, "email": email }),
        )
        .await
    }

    /// Email on incoming SMS
    pub async fn create_sms_email(
        &self,
        user_id: &str,
        endpoint_id: &str,
        email: &str,
    ) -> ApiResult<Value> {
        self.create(
            user_id,
            "sms/email",
            json!({ "endpointId": endpoint_id, "email": email }),
        )
        .await
    }
}
