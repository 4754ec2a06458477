//! Contact endpoints

use crate::client::SipgateClient;
use crate::endpoint::Endpoint;
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Contacts API interface
#[derive(Clone)]
pub struct ContactsApi {
    client: SipgateClient,
}

impl ContactsApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// All contacts
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/contacts")).await
    }

    /// Contacts within the account (users and groups)
    pub async fn internal(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/contacts/internal")).await
    }

    /// Delete one contact
    pub async fn delete(&self, contact_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/contacts/{contact_id}")))
            .await
    }

    /// Delete every contact
    pub async fn delete_all(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::delete("/contacts")).await
    }

    /// Import a base64-encoded CSV file
    pub async fn import_csv(&self, base64_content: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::post("/contacts/import/csv")
                    .json(json!({ "base64Content": base64_content })),
            )
            .await
    }

    /// Import from Google using an OAuth token
    pub async fn import_google(&self, token: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::post("/contacts/import/google").json(json!({ "token": token })))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{last_call, mock_client};
    use serde_json::json;
    use sipgate_transport::HttpMethod;

    #[tokio::test]
    async fn test_contact_endpoints() {
        let (client, fetcher) = mock_client();
        let contacts = client.contacts();

        contacts.list().await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Get, "/contacts".to_string(), None));

        contacts.internal().await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/contacts/internal");

        contacts.delete("c7").await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Delete, "/contacts/c7".to_string(), None));

        contacts.delete_all().await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Delete, "/contacts".to_string(), None));

        contacts.import_csv("bmFtZQ==").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (
                HttpMethod::Post,
                "/contacts/import/csv".to_string(),
                Some(json!({ "base64Content": "bmFtZQ==" }))
            )
        );

        contacts.import_google("ya29").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (
                HttpMethod::Post,
                "/contacts/import/google".to_string(),
                Some(json!({ "token": "ya29" }))
            )
        );
    }
}
