//! Account endpoints
//!
//! Account details, verification, balance, addresses and feature
//! restrictions.

use crate::client::SipgateClient;
use crate::endpoint::{Endpoint, Query};
use serde_json::{json, Value};
use sipgate_transport::ApiResult;

/// Restriction filter for [`AccountApi::restrictions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restrictions<'a> {
    /// Pre-encoded query fragment, appended verbatim
    Raw(&'a str),
    /// One `restriction=` parameter per name
    Names(&'a [&'a str]),
}

/// Account API interface
#[derive(Clone)]
pub struct AccountApi {
    client: SipgateClient,
}

impl AccountApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// Account details
    pub async fn get(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/account")).await
    }

    /// Confirm the account with a verification code
    pub async fn verify(&self, verification_code: &str) -> ApiResult<Value> {
        self.client
            .send(
                Endpoint::put("/account/verified")
                    .json(json!({ "verificationCode": verification_code })),
            )
            .await
    }

    /// Current credit
    pub async fn balance(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/balance")).await
    }

    /// Registered addresses
    pub async fn addresses(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/addresses")).await
    }

    /// Identity verification state
    pub async fn identity_verification(&self) -> ApiResult<Value> {
        self.client.send(Endpoint::get("/identityVerification")).await
    }

    /// Feature restrictions
    ///
    /// Without a user the account-wide list is fetched from `/restrictions`.
    /// With a user the path becomes `/restrictions/?userId=…`, followed by the
    /// optional filter.
    pub async fn restrictions(
        &self,
        user_id: Option<&str>,
        filter: Option<Restrictions<'_>>,
    ) -> ApiResult<Value> {
        self.client.send(restrictions_endpoint(user_id, filter)).await
    }
}

fn restrictions_endpoint(user_id: Option<&str>, filter: Option<Restrictions<'_>>) -> Endpoint {
    let Some(user_id) = user_id else {
        return Endpoint::get("/restrictions");
    };

    let query = Query::new().param("userId", user_id);
    let query = match filter {
        Some(Restrictions::Raw(fragment)) => query.raw(fragment),
        Some(Restrictions::Names(names)) => query.repeated("restriction", names),
        None => query,
    };
    Endpoint::get(query.to_path("/restrictions/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{last_call, mock_client};
    use sipgate_transport::HttpMethod;

    #[test]
    fn test_restrictions_paths() {
        assert_eq!(restrictions_endpoint(None, None).path, "/restrictions");
        assert_eq!(
            restrictions_endpoint(None, Some(Restrictions::Raw("restriction=X"))).path,
            "/restrictions"
        );
        assert_eq!(
            restrictions_endpoint(Some("w0"), None).path,
            "/restrictions/?userId=w0"
        );
        assert_eq!(
            restrictions_endpoint(
                Some("w0"),
                Some(Restrictions::Raw("restriction=CAN_USE_FAX"))
            )
            .path,
            "/restrictions/?userId=w0&restriction=CAN_USE_FAX"
        );
        assert_eq!(
            restrictions_endpoint(
                Some("w0"),
                Some(Restrictions::Names(&["CAN_SEND_SMS", "CAN_USE_FAX"]))
            )
            .path,
            "/restrictions/?userId=w0&restriction=CAN_SEND_SMS&restriction=CAN_USE_FAX"
        );
    }

    #[tokio::test]
    async fn test_account_endpoints() {
        let (client, fetcher) = mock_client();
        let account = client.account();

        account.get().await.unwrap();
        assert_eq!(last_call(&fetcher), (HttpMethod::Get, "/account".to_string(), None));

        account.verify("1234").await.unwrap();
        assert_eq!(
            last_call(&fetcher),
            (
                HttpMethod::Put,
                "/account/verified".to_string(),
                Some(json!({ "verificationCode": "1234" }))
            )
        );

        account.balance().await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/balance");

        account.addresses().await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/addresses");

        account.identity_verification().await.unwrap();
        assert_eq!(last_call(&fetcher).1, "/identityVerification");

        account
            .restrictions(Some("w0"), Some(Restrictions::Names(&["CAN_USE_FAX"])))
            .await
            .unwrap();
        assert_eq!(last_call(&fetcher).1, "/restrictions/?userId=w0&restriction=CAN_USE_FAX");
    }
}
