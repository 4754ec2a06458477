//! User endpoints

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Users API interface
#[derive(Clone)]
pub struct UsersApi {
    client: SipgateClient,
}

impl UsersApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// All users of the account
    ///
    /// GET /users/
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/users/")).await
    }

    /// A single user
    ///
    /// GET /users/{userId}
    pub async fn get(&self, user_id: &str) -> ApiResult<Value> {
        self.client.send(Endpoint::get(format!("/users/{user_id}"))).await
    }

    /// Set the device that rings by default
    ///
    /// PUT /users/{userId}/defaultdevice
    pub async fn set_default_device(&self, user_id: &str, device_id: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put(format!("/users/{user_id}/defaultdevice"))
                    .json(json!({ "deviceId": device_id })),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{last_call, mock_client};
    use serde_json::json;
    use sipgate_transport::HttpMethod;

    #[tokio::test]
    async fn test_user_endpoints() {
        let (client, fetcher) = mock_client();

        client.users().list().await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Get, "/users/".to_string(), None));

        client.users().get("w0").await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Get, "/users/w0".to_string(), None));

        client.users().set_default_device("w0", "e2").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (
                HttpMethod::Put,
                "/users/w0/defaultdevice".to_string(),
                Some(json!({ "deviceId": "e2" }))
            )
        );
    }
}
