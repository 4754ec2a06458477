//! Call history endpoints

use crate::client::SipgateClient;
use crate::endpoint::{Endpoint, Query};
use serde_json::Value;
use sipgate_transport::ApiResult;

/// Filter for [`HistoryApi::list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Phoneline whose history is listed
    pub phoneline_id: String,
    /// Entry types such as `CALL`, `FAX`, `SMS`, `VOICEMAIL`
    pub types: Vec<String>,
    /// Directions such as `INCOMING`, `OUTGOING`, `MISSED_INCOMING`
    pub directions: Vec<String>,
    /// Maximum number of entries
    pub limit: u32,
}

impl HistoryFilter {
    /// Filter for one phoneline with no type or direction restriction
    pub fn new(phoneline_id: impl Into<String>, limit: u32) -> Self {
        Self {
            phoneline_id: phoneline_id.into(),
            types: Vec::new(),
            directions: Vec::new(),
            limit,
        }
    }

    /// Restrict to the given entry types
    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given directions
    #[must_use]
    pub fn with_directions<I, S>(mut self, directions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directions = directions.into_iter().map(Into::into).collect();
        self
    }

    fn to_query(&self) -> Query {
        Query::new()
            .param("phonelineId", &self.phoneline_id)
            .param("limit", self.limit)
            .repeated("types", &self.types)
            .repeated("directions", &self.directions)
    }
}

/// History API interface
#[derive(Clone)]
pub struct HistoryApi {
    client: SipgateClient,
}

impl HistoryApi {
    pub(crate) fn new(client: SipgateClient) -> Self {
        Self { client }
    }

    /// History entries of a user
    ///
    /// GET /{userId}/history?phonelineId=…&limit=…&types=…&directions=…
    pub async fn list(&self, user_id: &str, filter: &HistoryFilter) -> ApiResult<Value> {
        let path = filter.to_query().to_path(&format!("/{user_id}/history"));
        self.client.send(Endpoint::get(path)).await
    }

    /// Delete a history entry
    pub async fn delete(&self, user_id: &str, entry_id: &str) -> ApiResult<Value> {
        self.client
            .send(Endpoint::delete(format!("/{user_id}/history/{entry_id}")))
            .await
    }
}
