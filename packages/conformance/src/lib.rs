//! Shared helpers for the HSD gateway conformance test suite.
//!
//! Provides [`MockNode`], a scripted stand-in for an HSD node speaking both
//! the REST and the JSON-RPC conventions, and [`spawn_gateway`], which wires
//! an in-process gateway to it. Both bind `TcpListener`s on ephemeral ports,
//! so every test gets real TCP and real HTTP.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use hsd_gateway::{build_router, NodeApi, NodeClient, NodeConfig};
use serde_json::{json, Value};

/// API key the mock node accepts when spawned with [`MockNode::require_key`].
pub const TEST_API_KEY: &str = "conformance-key";

#[derive(Default)]
struct Script {
    rest: HashMap<String, (u16, Value)>,
    rpc: HashMap<(String, String), Value>,
    api_key: Option<String>,
    delay: Option<Duration>,
}

/// A scripted HSD node.
///
/// REST `GET` paths answer with their scripted `(status, body)` or 404.
/// `POST /` dispatches on `method` and the first `params` entry, answering
/// `{"result": <scripted>, "error": null}` or a `null` result.
#[derive(Clone, Default)]
pub struct MockNode {
    script: Arc<Mutex<Script>>,
    hits: Arc<AtomicUsize>,
}

impl MockNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject requests without basic auth `x:TEST_API_KEY`.
    pub fn require_key(self) -> Self {
        self.script.lock().unwrap().api_key = Some(TEST_API_KEY.to_string());
        self
    }

    /// Hold every response for `delay` before answering.
    pub fn delay(self, delay: Duration) -> Self {
        self.script.lock().unwrap().delay = Some(delay);
        self
    }

    pub fn rest(self, path: &str, body: Value) -> Self {
        self.rest_status(path, 200, body)
    }

    pub fn rest_status(self, path: &str, status: u16, body: Value) -> Self {
        self.script
            .lock()
            .unwrap()
            .rest
            .insert(path.to_string(), (status, body));
        self
    }

    /// Script the raw RPC response object for `method(arg)`.
    pub fn rpc_response(self, method: &str, arg: &str, response: Value) -> Self {
        self.script
            .lock()
            .unwrap()
            .rpc
            .insert((method.to_string(), arg.to_string()), response);
        self
    }

    pub fn rpc(self, method: &str, arg: &str, result: Value) -> Self {
        self.rpc_response(method, arg, json!({ "result": result, "error": null }))
    }

    /// Number of requests the node has received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Serve the node on an ephemeral port and return its address.
    pub async fn spawn(&self) -> SocketAddr {
        let app = Router::new().fallback(any(handle)).with_state(self.clone());
        serve_ephemeral(app).await
    }
}

async fn handle(
    State(node): State<MockNode>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    node.hits.fetch_add(1, Ordering::SeqCst);
    let delay = node.script.lock().unwrap().delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let script = node.script.lock().unwrap();

    if let Some(ref key) = script.api_key {
        if !authorized(&headers, key) {
            return (StatusCode::UNAUTHORIZED, "Unauthorized.").into_response();
        }
    }

    if method == Method::POST && uri.path() == "/" {
        let call: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        let rpc_method = call["method"].as_str().unwrap_or_default().to_string();
        let arg = call["params"][0].as_str().unwrap_or_default().to_string();
        let response = script
            .rpc
            .get(&(rpc_method, arg))
            .cloned()
            .unwrap_or_else(|| json!({ "result": null, "error": null }));
        return Json(response).into_response();
    }

    match script.rest.get(uri.path()) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(body.clone()),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": { "message": "Not found." } })))
            .into_response(),
    }
}

fn authorized(headers: &HeaderMap, key: &str) -> bool {
    // Base64 of "x:conformance-key".
    let expected = match key {
        TEST_API_KEY => "Basic eDpjb25mb3JtYW5jZS1rZXk=",
        _ => return false,
    };
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected)
}

async fn serve_ephemeral(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("conformance server error");
    });
    addr
}

/// Start an ephemeral in-process gateway in front of the node at `node_addr`
/// and return its base URL, e.g. `http://127.0.0.1:51234`.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound or the client cannot be built.
pub async fn spawn_gateway(node_addr: SocketAddr, api_key: Option<&str>) -> String {
    spawn_gateway_with_timeout(node_addr, api_key, Duration::from_secs(5)).await
}

/// Like [`spawn_gateway`], with an explicit upstream request timeout.
pub async fn spawn_gateway_with_timeout(
    node_addr: SocketAddr,
    api_key: Option<&str>,
    timeout: Duration,
) -> String {
    let config = NodeConfig {
        host: node_addr.ip().to_string(),
        port: node_addr.port(),
        api_key: api_key.map(str::to_string),
        timeout,
    };
    let client = NodeClient::new(&config).expect("build node client");
    let node: Arc<dyn NodeApi> = Arc::new(client);
    let addr = serve_ephemeral(build_router(node)).await;
    format!("http://{addr}")
}

/// Spawn `node` and a gateway authenticated with [`TEST_API_KEY`] in front of it.
pub async fn spawn_pair(node: &MockNode) -> String {
    let node_addr = node.spawn().await;
    spawn_gateway(node_addr, Some(TEST_API_KEY)).await
}
