//! Faxline endpoints, including group faxlines

use crate::client::SipgateClient;
use crate::endpoint::{Endpoint, Query};
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Faxlines API interface
#[derive(Clone)]
pub struct FaxlinesApi {
    client: SipgateClient,
}

impl FaxlinesApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// Faxlines of a user
    pub async fn list(&self, user_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::get(format!("/{user_id}/faxlines"))).await
    }

    /// Create a faxline
    pub async fn create(&self, user_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::post(format!("/{user_id}/faxlines"))).await
    }

    /// Delete a faxline
    pub async fn delete(&self, user_id: &str, faxline_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/{user_id}/faxlines/{faxline_id}")))
            .await
    }

    /// Numbers routed to a faxline
    pub async fn numbers(&self, user_id: &str, faxline_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/{user_id}/faxlines/{faxline_id}/numbers")))
            .await
    }

    /// Rename a faxline
    pub async fn set_alias(
        &self,
        user_id: &str,
        faxline_id: &str,
        alias: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/{user_id}/faxlines/{faxline_id}"))
                    .json(json!({ "alias": alias })),
            )
            .await
    }

    /// Set the header line printed on outgoing faxes
    pub async fn set_tagline(
        &self,
        user_id: &str,
        faxline_id: &str,
        tagline: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/{user_id}/faxlines/{faxline_id}/tagline"))
                    .json(json!({ "value": tagline })),
            )
            .await
    }

    /// Outgoing caller id
    pub async fn caller_id(&self, user_id: &str, faxline_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/{user_id}/faxlines/{faxline_id}/callerid")))
            .await
    }

    /// Set the outgoing caller id
    pub async fn set_caller_id(
        &self,
        user_id: &str,
        faxline_id: &str,
        caller_id: &str,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/{user_id}/faxlines/{faxline_id}/callerid"))
                    .json(json!({ "value": caller_id })),
            )
            .await
    }

    /// Group faxlines, optionally limited to those a user belongs to
    pub async fn group_faxlines(&self, user_id: Option<&str>) -> ApiResult<Value> {
        let path = Query::new().param_opt("userId", user_id).to_path("/groupfaxlines");
        self.client.send(Endpoint::get(path)).await
    }

    /// Caller id of a group faxline
    pub async fn group_faxline_caller_id(&self, faxline_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/groupfaxlines/{faxline_id}/callerid")))
            .await
    }

    /// Numbers of a group faxline
    pub async fn group_faxline_numbers(&self, faxline_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/groupfaxlines/{faxline_id}/numbers")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{last_call, mock_client};
    use serde_json::json;
    use sipgate_transport::HttpMethod;

    #[tokio::test]
    async fn test_faxline_endpoints() {
        let (client, fetcher) = mock_client();
        let faxlines = client.faxlines();

        faxlines.list("w0").await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Get, "/w0/faxlines".to_string(), None));

        faxlines.create("w0").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (HttpMethod::Post, "/w0/faxlines".to_string(), Some(json!({})))
        );

        faxlines.numbers("w0", "f0").await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/w0/faxlines/f0/numbers");

        faxlines.set_alias("w0", "f0", "Office fax").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (HttpMethod::Put, "/w0/faxlines/f0".to_string(), Some(json!({ "alias": "Office fax" })))
        );

        faxlines.set_tagline("w0", "f0", "ACME").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (
                HttpMethod::Put,
                "/w0/faxlines/f0/tagline".to_string(),
                Some(json!({ "value": "ACME" }))
            )
        );

        faxlines.caller_id("w0", "f0").await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/w0/faxlines/f0/callerid");

        faxlines.set_caller_id("w0", "f0", "+4921100000000").await.unwrap();
        assert_eq!(last_call(&fetcher).2, Some(json!({ "value": "+4921100000000" })));

        faxlines.delete("w0", "f0").await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Delete, "/w0/faxlines/f0".to_string(), None));
    }

    #[tokio::test]
    async fn test_group_faxlines() {
        let (client, fetcher) = mock_client();
        let faxlines = client.faxlines();

        faxlines.group_faxlines(None).await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/groupfaxlines");

        faxlines.group_faxlines(Some("w0")).await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/groupfaxlines?userId=w0");

        faxlines.group_faxline_caller_id("gf0").await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/groupfaxlines/gf0/callerid");

        faxlines.group_faxline_numbers("gf0").await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/groupfaxlines/gf0/numbers");
    }
}
