//! SMS extension endpoints
//!
//! Sending a message goes through [`SessionsApi::send_sms`](super::SessionsApi::send_sms);
//! this module manages the extensions and their caller ids.

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// SMS API interface
#[derive(Clone)]
pub struct SmsApi {
    client: SipgateClient,
}

impl SmsApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// SMS extensions of a user
    pub async fn list(&self, user_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::get(format!("/{user_id}/sms"))).await
    }

    /// Rename an SMS extension
    pub async fn set_alias(&self, user_id: &str, sms_id: &str, alias: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::put(format!("/{user_id}/sms/{sms_id}")).json(json!({ "alias": alias })))
            .await
    }

    /// Caller ids registered for an extension
    pub async fn caller_ids(&self, user_id: &str, sms_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/{user_id}/sms/{sms_id}/callerids")))
            .await
    }

    /// Register a phone number as caller id; triggers a verification code
    pub async fn create_caller_id(
        &self,
        user_id: &str,
        sms_id: &str,
        phonenumber: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post(format!("/{user_id}/sms/{sms_id}/callerids"))
                    .json(json!({ "phonenumber": phonenumber })),
            )
            .await
    }

    /// Confirm a caller id with its verification code
    pub async fn verify_caller_id(
        &self,
        user_id: &str,
        sms_id: &str,
        caller_id: &str,
        verification_code: &str,
    ) -> ApiResult<Value> {
        let path = format!("/{user_id}/sms/{sms_id}/callerids/{caller_id}/verification");
        self.client
            .send(Endpoint::post(path).json(json!({ "verificationCode": verification_code })))
            .await
    }

    /// Choose whether a caller id is the default sender
    pub async fn set_active_caller_id(
        &self,
        user_id: &str,
        sms_id: &str,
        caller_id: &str,
        default_number: bool,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/{user_id}/sms/{sms_id}/callerids/{caller_id}"))
                    .json(json!({ "defaultNumber": default_number })),
            )
            .await
    }
}
