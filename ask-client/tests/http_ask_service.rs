use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use ask_client::{AskBackend, AskClientConfig, AskRequest, HttpAskService, TransportError};
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};

type Seen = Arc<Mutex<Vec<Value>>>;

/// Spawns a one-route backend on an ephemeral port and returns its base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn service(endpoint: &str) -> HttpAskService {
    HttpAskService::new(AskClientConfig::with_endpoint(endpoint)).unwrap()
}

#[tokio::test]
async fn posts_user_query_and_decodes_result() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/ask",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(body);
                Json(json!({ "query": "select from trade where volume>1000", "result": [{ "sym": "IBM" }] }))
            }),
        )
        .with_state(seen.clone());
    let base = spawn_backend(router).await;

    let svc = service(&base);
    let resp = svc
        .ask(&AskRequest::new("Show trades above 1000 shares"))
        .await
        .unwrap();

    assert_eq!(resp.into_result(), Some(json!([{ "sym": "IBM" }])));
    let bodies = seen.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({ "user_query": "Show trades above 1000 shares" })]);
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let router = Router::new().route(
        "/ask",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "q server down") }),
    );
    let base = spawn_backend(router).await;
    let svc = service(&base);

    let err = svc.ask(&AskRequest::new("x")).await.unwrap_err();
    match &err {
        TransportError::HttpStatus { status, snippet, .. } => {
            assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(snippet, "q server down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.message(),
        Some(format!(
            "Http failure response for {base}/ask: 500 Internal Server Error"
        ))
    );
}

#[tokio::test]
async fn body_that_is_not_json_is_a_decode_failure() {
    let router = Router::new().route("/ask", post(|| async { "not json" }));
    let base = spawn_backend(router).await;
    let svc = service(&base);

    let err = svc.ask(&AskRequest::new("x")).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode { .. }));
    assert_eq!(
        err.message(),
        Some(format!("Http failure during parsing for {base}/ask"))
    );
}

#[tokio::test]
async fn body_without_result_decodes_to_absent() {
    let router = Router::new().route("/ask", post(|| async { Json(json!({ "detail": "ok" })) }));
    let base = spawn_backend(router).await;

    let resp = service(&base).ask(&AskRequest::new("x")).await.unwrap();
    assert_eq!(resp.into_result(), None);
}

#[tokio::test]
async fn unreachable_backend_is_a_connect_failure() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base = format!("http://{addr}");

    let err = service(&base).ask(&AskRequest::new("x")).await.unwrap_err();
    assert!(matches!(err, TransportError::Connect { .. }));
    assert_eq!(
        err.message(),
        Some(format!("Http failure response for {base}/ask: 0 Unknown Error"))
    );
}

#[test]
fn rejects_invalid_endpoint() {
    let err = HttpAskService::new(AskClientConfig::with_endpoint("ftp://x")).unwrap_err();
    assert!(err.to_string().contains("must start with http:// or https://"));
}

#[test]
fn default_service_targets_fixed_address() {
    let svc = HttpAskService::new(AskClientConfig::default()).unwrap();
    assert_eq!(svc.url(), "http://127.0.0.1:8000/ask");
}

#[tokio::test]
async fn truncated_success_body_is_a_decode_failure() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Promises 64 bytes, sends 10, then hangs up.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        // Drain the whole request so closing does not reset the connection.
        let mut seen = Vec::new();
        let mut buf = [0u8; 1024];
        while !seen.ends_with(b"}") {
            let n = sock.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
        }
        sock.write_all(
            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{\"result\":",
        )
        .await
        .unwrap();
        sock.shutdown().await.unwrap();
    });
    let base = format!("http://{addr}");

    let err = service(&base).ask(&AskRequest::new("x")).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode { .. }), "{err:?}");
    assert_eq!(
        err.message(),
        Some(format!("Http failure during parsing for {base}/ask"))
    );
}
