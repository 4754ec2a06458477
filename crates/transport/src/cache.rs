//! Single-flight cache for in-flight GET requests
//!
//! Maps a request key (the full URL) to the shared result of the GET that is
//! currently in flight for it. A caller arriving while an entry exists joins
//! that result instead of issuing a second request. Entries only live for
//! the duration of the request: the request removes its own entry before its
//! result is delivered, so completed results are never served to later,
//! unrelated calls.
//!
//! The cache is an explicit value. Cloning it shares the underlying map, which
//! is how derived transports dedupe against their parent.

use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use crate::error::ApiResult;

/// Shared handle to the eventual result of an in-flight GET
pub type SharedResponse = Shared<BoxFuture<'static, ApiResult<Value>>>;

/// How a caller got hold of a [`SharedResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The caller registered a new entry and owns the request
    Issued {
        /// Generation id of the entry, used for removal
        id: u64,
    },
    /// The caller joined a request that was already in flight
    Joined {
        /// Generation id of the joined entry
        id: u64,
    },
}

impl Lookup {
    /// Generation id of the entry, issued or joined
    #[must_use]
    pub fn id(self) -> u64 {
        match self {
            Self::Issued { id } | Self::Joined { id } => id,
        }
    }
}

struct Entry {
    id: u64,
    response: SharedResponse,
}

/// Dedup cache of pending GET requests
#[derive(Clone, Default)]
pub struct PendingRequests {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    next_id: Arc<AtomicU64>,
}

impl PendingRequests {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests currently in flight
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no request is in flight
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether a request for `key` is in flight
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Join the in-flight request for `key`, or register a new one.
    ///
    /// `start` is only called when no entry exists. It receives the new
    /// entry's id and must return the (not yet polled) request future.
    /// Lookup and insertion happen under one lock acquisition, so two
    /// callers can never both end up issuing.
    pub fn join_or_insert<F>(&self, key: &str, start: F) -> (Lookup, SharedResponse)
    where
        F: FnOnce(u64) -> BoxFuture<'static, ApiResult<Value>>,
    {
        let mut entries = self.lock();
        if let Some(entry) = entries.get(key) {
            return (Lookup::Joined { id: entry.id }, entry.response.clone());
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let response = start(id).shared();
        entries.insert(
            key.to_string(),
            Entry {
                id,
                response: response.clone(),
            },
        );
        (Lookup::Issued { id }, response)
    }

    /// Remove the entry for `key` if it still belongs to generation `id`.
    ///
    /// Returns `false` when the entry is already gone or has been replaced
    /// by a newer request.
    pub fn remove(&self, key: &str, id: u64) -> bool {
        let mut entries = self.lock();
        if entries.get(key).is_some_and(|entry| entry.id == id) {
            entries.remove(key);
            true
        } else {
            false
        }
    }

    /// Remove the entry for `key` (generation `id`) unless a caller other
    /// than the one releasing still holds its response.
    ///
    /// The map keeps one handle and the releasing caller another, so the
    /// entry goes once at most two remain.
    fn release(&self, key: &str, id: u64) {
        let mut entries = self.lock();
        let last_caller = entries.get(key).is_some_and(|entry| {
            entry.id == id
                && entry
                    .response
                    .strong_count()
                    .is_none_or(|count| count <= 2)
        });
        if last_caller {
            entries.remove(key);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PendingRequests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.lock();
        f.debug_struct("PendingRequests")
            .field("keys", &entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// One caller's handle on an in-flight GET.
///
/// Resolves to the shared response. When dropped it releases the entry,
/// which is removed once no other caller is waiting on it. Callers that
/// give up early therefore never leave an entry behind, and never pull it
/// out from under a caller that is still driving the request.
pub(crate) struct PendingHandle {
    pending: PendingRequests,
    key: String,
    id: u64,
    response: SharedResponse,
}

impl PendingHandle {
    pub(crate) fn new(
        pending: PendingRequests,
        key: String,
        id: u64,
        response: SharedResponse,
    ) -> Self {
        Self {
            pending,
            key,
            id,
            response,
        }
    }
}

impl Future for PendingHandle {
    type Output = ApiResult<Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.response).poll(cx)
    }
}

impl Drop for PendingHandle {
    fn drop(&mut self) {
        self.pending.release(&self.key, self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ready(value: Value) -> BoxFuture<'static, ApiResult<Value>> {
        async move { Ok(value) }.boxed()
    }

    #[test]
    fn test_second_lookup_joins() {
        let pending = PendingRequests::new();
        let (first, _) = pending.join_or_insert("https://api/a", |_| ready(json!(1)));
        let (second, _) = pending.join_or_insert("https://api/a", |_| {
            panic!("must not start a second request")
        });

        assert!(matches!(first, Lookup::Issued { .. }));
        assert_eq!(second, Lookup::Joined { id: first.id() });
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_distinct_keys_do_not_join() {
        let pending = PendingRequests::new();
        pending.join_or_insert("https://api/a", |_| ready(json!(1)));
        let (lookup, _) = pending.join_or_insert("https://api/b", |_| ready(json!(2)));

        assert!(matches!(lookup, Lookup::Issued { .. }));
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_remove_checks_generation() {
        let pending = PendingRequests::new();
        let (Lookup::Issued { id: old }, _) = pending.join_or_insert("k", |_| ready(json!(1)))
        else {
            panic!("expected a new entry");
        };
        assert!(pending.remove("k", old));

        let (Lookup::Issued { id: new }, _) = pending.join_or_insert("k", |_| ready(json!(2)))
        else {
            panic!("expected a new entry");
        };
        assert!(!pending.remove("k", old));
        assert!(pending.contains("k"));
        assert!(pending.remove("k", new));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let pending = PendingRequests::new();
        let shared = pending.clone();
        pending.join_or_insert("k", |_| ready(json!(1)));
        assert!(shared.contains("k"));
    }

    #[tokio::test]
    async fn test_joined_handles_resolve_to_same_value() {
        let pending = PendingRequests::new();
        let (_, first) = pending.join_or_insert("k", |_| ready(json!({ "id": 7 })));
        let (_, second) = pending.join_or_insert("k", |_| ready(json!(null)));

        assert_eq!(first.await.unwrap(), json!({ "id": 7 }));
        assert_eq!(second.await.unwrap(), json!({ "id": 7 }));
    }

    #[test]
    fn test_last_handle_removes_on_drop() {
        let pending = PendingRequests::new();
        let (lookup, response) = pending.join_or_insert("k", |_| ready(json!(1)));
        drop(PendingHandle::new(pending.clone(), "k".to_string(), lookup.id(), response));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_handle_keeps_entry_while_others_wait() {
        let pending = PendingRequests::new();
        let (issued, first) = pending.join_or_insert("k", |_| ready(json!(1)));
        let (joined, second) = pending.join_or_insert("k", |_| ready(json!(2)));
        let first = PendingHandle::new(pending.clone(), "k".to_string(), issued.id(), first);
        let second = PendingHandle::new(pending.clone(), "k".to_string(), joined.id(), second);

        drop(first);
        assert!(pending.contains("k"));

        drop(second);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_stale_handle_leaves_newer_entry() {
        let pending = PendingRequests::new();
        let (old, response) = pending.join_or_insert("k", |_| ready(json!(1)));
        let handle = PendingHandle::new(pending.clone(), "k".to_string(), old.id(), response);
        assert!(pending.remove("k", old.id()));

        pending.join_or_insert("k", |_| ready(json!(2)));
        drop(handle);
        assert!(pending.contains("k"));
    }
}
