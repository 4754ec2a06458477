//! End-to-end tests of `Transport` over real HTTP against an in-process server.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use sipgate_transport::{ApiError, CancellationToken, Transport, TransportConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Default)]
struct Seen {
    slow_hits: AtomicUsize,
    authorization: Mutex<Vec<Option<String>>>,
}

impl Seen {
    fn record(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.authorization.lock().unwrap().push(value);
    }

    fn last_authorization(&self) -> Option<String> {
        self.authorization.lock().unwrap().last().cloned().flatten()
    }
}

async fn user(State(seen): State<Arc<Seen>>, headers: HeaderMap) -> Json<Value> {
    seen.record(&headers);
    Json(json!({ "id": "1", "name": "Ada" }))
}

async fn translations(State(seen): State<Arc<Seen>>, headers: HeaderMap) -> Json<Value> {
    seen.record(&headers);
    Json(json!({ "hello": "Hallo" }))
}

async fn slow(State(seen): State<Arc<Seen>>) -> Json<Value> {
    let n = seen.slow_hits.fetch_add(1, Ordering::SeqCst) + 1;
    tokio::time::sleep(Duration::from_millis(100)).await;
    Json(json!({ "n": n }))
}

async fn hang() -> &'static str {
    tokio::time::sleep(Duration::from_secs(30)).await;
    "too late"
}

async fn echo(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

fn app(seen: Arc<Seen>) -> Router {
    Router::new()
        .route("/users/1", get(user))
        .route("/translations/{locale}", get(translations))
        .route("/slow", get(slow))
        .route("/hang", get(hang))
        .route("/plain", get(|| async { "not json" }))
        .route(
            "/fail",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "boom" })),
                )
            }),
        )
        .route(
            "/authorization/token",
            delete(|| async { (StatusCode::UNAUTHORIZED, "expired") }),
        )
        .route("/echo", post(echo))
        .with_state(seen)
}

async fn serve() -> (String, Arc<Seen>) {
    let seen = Arc::new(Seen::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(Arc::clone(&seen));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

fn transport(api_url: &str) -> Transport {
    Transport::new(TransportConfig::new(api_url).with_token("tok")).unwrap()
}

#[tokio::test]
async fn test_get_with_static_token() {
    let (url, seen) = serve().await;
    let t = transport(&url);

    let user = t.get("/users/1").await.unwrap();
    assert_eq!(user, json!({ "id": "1", "name": "Ada" }));
    assert_eq!(seen.last_authorization().as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn test_unauthenticated_get_sends_no_authorization() {
    let (url, seen) = serve().await;
    let t = transport(&url);

    let body = t.get_unauthenticated("/translations/en").await.unwrap();
    assert_eq!(body["hello"], "Hallo");
    assert_eq!(seen.last_authorization(), None);
}

#[tokio::test]
async fn test_concurrent_gets_hit_server_once() {
    let (url, seen) = serve().await;
    let t = transport(&url);

    let (a, b) = tokio::join!(t.get("/slow"), t.get("/slow"));
    assert_eq!(a.unwrap(), json!({ "n": 1 }));
    assert_eq!(b.unwrap(), json!({ "n": 1 }));
    assert_eq!(seen.slow_hits.load(Ordering::SeqCst), 1);

    assert_eq!(t.get("/slow").await.unwrap(), json!({ "n": 2 }));
}

#[tokio::test]
async fn test_plain_text_body() {
    let (url, _) = serve().await;
    let t = transport(&url);

    let body = tokio_test::assert_ok!(t.get("/plain").await);
    assert_eq!(body, Value::String("not json".to_string()));
}

#[tokio::test]
async fn test_server_error_classification() {
    let (url, _) = serve().await;

    let err = transport(&url).get("/fail").await.unwrap_err();
    let payload = err.payload().unwrap();
    assert_eq!(payload.status, 500);
    assert_eq!(payload.status_text, "Internal Server Error");
    assert_eq!(payload.body, Some(json!({ "message": "boom" })));

    let lenient =
        Transport::new(TransportConfig::new(&url).skip_response_error_handling(true)).unwrap();
    assert_eq!(lenient.get("/fail").await.unwrap(), json!({ "message": "boom" }));
}

#[tokio::test]
async fn test_unauthorized_handler() {
    let (url, _) = serve().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let t = Transport::new(
        TransportConfig::new(&url)
            .with_token("tok")
            .on_unauthorized(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
    )
    .unwrap();

    let err = t.del("/authorization/token").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.payload().unwrap().body, None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_post_sends_json_payload() {
    let (url, _) = serve().await;
    let t = transport(&url);

    assert_eq!(t.post("/echo", None).await.unwrap(), json!({}));
    assert_eq!(
        t.post("/echo", Some(json!({ "caller": "e0", "callee": "+4921100000000" })))
            .await
            .unwrap(),
        json!({ "caller": "e0", "callee": "+4921100000000" })
    );
}

#[tokio::test]
async fn test_cancellation_aborts_hanging_request() {
    let (url, _) = serve().await;
    let token = CancellationToken::new();
    let t = transport(&url).cancellable(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let result = tokio::time::timeout(Duration::from_secs(5), t.get("/hang"))
        .await
        .expect("cancellation must end the request promptly");
    canceller.await.unwrap();

    assert!(matches!(result, Err(ApiError::Cancelled)));
    assert!(t.pending().is_empty());
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = transport(&format!("http://{addr}")).get("/users/1").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
}
