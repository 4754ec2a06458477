//! Group endpoints

use crate::client::SipgateClient;
use crate::endpoint::{Endpoint, Query};
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Groups API interface
#[derive(Clone)]
pub struct GroupsApi {
    client: SipgateClient,
}

impl GroupsApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// Groups of the account, optionally limited to one member
    pub async fn list(&self, user_id: Option<&str>) -> ApiResult<Value> {
        let path = Query::new().param_opt("userId", user_id).to_path("/groups");
        self.client.send(Endpoint::get(path)).await
    }

    /// Numbers of a group
    pub async fn numbers(&self, group_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::get(format!("/groups/{group_id}/numbers"))).await
    }

    /// Members of a group
    pub async fn users(&self, group_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::get(format!("/groups/{group_id}/users"))).await
    }

    /// Add a device to a group
    pub async fn add_device(&self, group_id: &str, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post(format!("/groups/{group_id}/devices"))
                    .json(json!({ "deviceId": device_id })),
            )
            .await
    }

    /// Remove a device from a group
    pub async fn remove_device(&self, group_id: &str, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/groups/{group_id}/devices/{device_id}")))
            .await
    }

    /// Voicemail box of a group
    pub async fn voicemail(&self, group_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::get(format!("/groups/{group_id}/voicemail")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{last_call, mock_client};
    use serde_json::json;
    use sipgate_transport::HttpMethod;

    #[tokio::test]
    async fn test_group_endpoints() {
        let (client, fetcher) = mock_client();
        let groups = client.groups();

        groups.list(None).await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Get, "/groups".to_string(), None));

        groups.list(Some("w0")).await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/groups?userId=w0");

        groups.numbers("g0").await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/groups/g0/numbers");

        groups.users("g0").await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/groups/g0/users");

        groups.voicemail("g0").await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/groups/g0/voicemail");

        groups.add_device("g0", "e0").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (HttpMethod::Post, "/groups/g0/devices".to_string(), Some(json!({ "deviceId": "e0" })))
        );

        groups.remove_device("g0", "e0").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (HttpMethod::Delete, "/groups/g0/devices/e0".to_string(), None)
        );
    }
}
