//! Session endpoints
//!
//! Login/logout plus the one-shot actions living under `/sessions`:
//! click-to-dial, fax sending and SMS sending.

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::{ApiError, ApiResult};
use tracing::debug;

/// Sessions API interface
#[derive(Clone)]
pub struct SessionsApi {
    client: SipgateClient,
}

impl SessionsApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// Log in and install the returned token on the transport
    ///
    /// POST /authorization/token
    pub async fn create(&self, username: &str, password: &str) -> ApiResult<Value> {
        let response = self
            .client
            .send(
                Endpoint::post("/authorization/token")
                    .json(json!({ "username": username, "password": password })),
            )
            .await?;

        let token = response
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::token("login response carries no token"))?;
        self.client.transport().set_token(Some(token.to_string()));
        debug!("Session token installed");

        Ok(response)
    }

    /// Log out and clear the static token
    ///
    /// DELETE /authorization/token
    pub async fn destroy(&self) -> ApiResult<Value> {
        let response = self.client.send(Endpoint::delete("/authorization/token")).await?;
        self.client.transport().set_token(None);
        Ok(response)
    }

    /// Information about the authenticated principal
    ///
    /// GET /authorization/userinfo
    pub async fn user_info(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/authorization/userinfo")).await
    }

    /// Start a click-to-dial call
    ///
    /// POST /sessions/calls
    pub async fn click_to_dial(&self, caller: &str, callee: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post("/sessions/calls")
                    .json(json!({ "caller": caller, "callee": callee })),
            )
            .await
    }

    /// Send a fax document
    ///
    /// POST /sessions/fax
    pub async fn send_fax(
        &self,
        faxline_id: &str,
        recipient: &str,
        filename: &str,
        base64_content: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(Endpoint::post("/sessions/fax").json(json!({
                "faxlineId": faxline_id,
                "recipient": recipient,
                "filename": filename,
                "base64Content": base64_content,
            })))
            .await
    }

    /// Resend a previously sent fax
    ///
    /// POST /sessions/fax/resend
    pub async fn resend_fax(&self, faxline_id: &str, fax_id: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post("/sessions/fax/resend")
                    .json(json!({ "faxlineId": faxline_id, "faxId": fax_id })),
            )
            .await
    }

    /// Send a text message
    ///
    /// POST /sessions/sms
    pub async fn send_sms(&self, sms_id: &str, recipient: &str, message: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::post("/sessions/sms").json(json!({
                "smsId": sms_id,
                "recipient": recipient,
                "message": message,
            })))
            .await
    }
}
