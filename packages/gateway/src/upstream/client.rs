//! Authenticated HTTP transport to the HSD node.
//!
//! [`NodeClient`] performs exactly one HTTP exchange per [`UpstreamCall`] and
//! never retries. It reports what came back (status + body) or why nothing
//! came back ([`TransportError`]); interpreting the body is left to
//! [`super::normalize`].

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::NodeConfig;

// ---------------------------------------------------------------------------
// UpstreamCall
// ---------------------------------------------------------------------------

/// How a call reaches the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    /// `GET {base}/{method}/{params...}`.
    Get,
    /// `POST {base}/` with `{"method": ..., "params": [...]}`.
    Post,
}

/// One request to the node.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamCall {
    /// REST path (for [`HttpVerb::Get`]) or RPC method name (for [`HttpVerb::Post`]).
    pub method: String,
    /// Path segments or RPC arguments, in order.
    pub params: Vec<Value>,
    pub verb: HttpVerb,
}

impl UpstreamCall {
    /// `GET {base}/` — the node's root status object.
    pub fn root() -> Self {
        Self::get("", Vec::<Value>::new())
    }

    /// A REST `GET` of `path` followed by `segments`.
    pub fn get<V: Into<Value>>(path: impl Into<String>, segments: impl IntoIterator<Item = V>) -> Self {
        Self {
            method: path.into(),
            params: segments.into_iter().map(Into::into).collect(),
            verb: HttpVerb::Get,
        }
    }

    /// A JSON-RPC call dispatched through `POST {base}/`.
    pub fn rpc<V: Into<Value>>(method: impl Into<String>, params: impl IntoIterator<Item = V>) -> Self {
        Self {
            method: method.into(),
            params: params.into_iter().map(Into::into).collect(),
            verb: HttpVerb::Post,
        }
    }

    /// Request path relative to the node base URL.
    ///
    /// Each segment is percent-encoded, so a parameter containing `/` stays a
    /// single path component.
    pub fn path(&self) -> String {
        if self.verb == HttpVerb::Post {
            return "/".into();
        }
        let mut path = String::new();
        let method = self.method.trim_matches('/');
        if !method.is_empty() {
            path.push('/');
            path.push_str(method);
        }
        for param in &self.params {
            path.push('/');
            path.push_str(&urlencoding::encode(&segment_text(param)));
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// JSON body for an RPC call.
    pub fn rpc_body(&self) -> Value {
        json!({ "method": self.method, "params": self.params })
    }
}

fn segment_text(param: &Value) -> String {
    match param {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for UpstreamCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verb {
            HttpVerb::Get => write!(f, "GET {}", self.path()),
            HttpVerb::Post => write!(f, "RPC {}", self.method),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw results
// ---------------------------------------------------------------------------

/// The request never produced an HTTP response (refused, timed out, DNS,
/// body read failure).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError(e.to_string())
    }
}

/// The HTTP client for a node could not be constructed.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Response body as received.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    Json(Value),
    /// The body did not decode as JSON.
    Bytes(Bytes),
}

/// An HTTP response from the node, not yet interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: RawBody,
}

impl RawResponse {
    /// A JSON response; used by fakes in tests.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: RawBody::Json(body),
        }
    }
}

pub type RawResult = Result<RawResponse, TransportError>;

// ---------------------------------------------------------------------------
// NodeApi
// ---------------------------------------------------------------------------

/// Anything that can carry an [`UpstreamCall`] to a node.
///
/// [`NodeClient`] is the network implementation; tests substitute scripted
/// fakes.
#[async_trait]
pub trait NodeApi: Send + Sync + 'static {
    async fn call(&self, call: &UpstreamCall) -> RawResult;
}

/// reqwest-backed [`NodeApi`] bound to one node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl NodeClient {
    /// Build a client for the node described by `config`.
    pub fn new(config: &NodeConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl NodeApi for NodeClient {
    async fn call(&self, call: &UpstreamCall) -> RawResult {
        debug!("upstream: {call}");

        let url = format!("{}{}", self.base_url, call.path());
        let mut req = match call.verb {
            HttpVerb::Get => self.http.get(&url),
            HttpVerb::Post => self.http.post(&url).json(&call.rpc_body()),
        };
        if let Some(ref key) = self.api_key {
            req = req.basic_auth(NodeConfig::API_KEY_USER, Some(key));
        }

        let failed = |e: reqwest::Error| {
            warn!("upstream: {call} failed: {e}");
            TransportError::from(e)
        };
        let response = req.send().await.map_err(failed)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(failed)?;

        let body = match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => RawBody::Json(value),
            Err(_) => RawBody::Bytes(bytes),
        };

        if status != 200 {
            debug!("upstream: {call} returned status {status}");
        }
        Ok(RawResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
