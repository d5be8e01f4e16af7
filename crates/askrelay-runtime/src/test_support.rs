//! Local HTTP stubs standing in for provider endpoints in tests.

use axum::body::Bytes;
use axum::extract::RawQuery;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri};
use axum::Router;
use serde_json::Value as JsonValue;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request seen by a stub.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: JsonValue,
}

pub struct StubServer {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

/// Serve `status` with `body` for every path, recording each request.
pub async fn spawn_stub(status: StatusCode, body: &'static str) -> StubServer {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    let app = Router::new().fallback(
        move |uri: Uri, RawQuery(query): RawQuery, headers: HeaderMap, bytes: Bytes| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(CapturedRequest {
                    path: uri.path().to_string(),
                    query,
                    authorization: headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null),
                });
                (status, body)
            }
        },
    );

    StubServer {
        base_url: serve(app).await,
        captured,
    }
}

/// Serve every path after sleeping for `delay`.
pub async fn spawn_slow_stub(delay: Duration) -> StubServer {
    let app = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        (StatusCode::OK, "{}")
    });

    StubServer {
        base_url: serve(app).await,
        captured: Arc::new(Mutex::new(Vec::new())),
    }
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/", addr)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
