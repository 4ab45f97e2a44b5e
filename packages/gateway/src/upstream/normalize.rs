//! Folds the node's REST and JSON-RPC response conventions into [`NodeResult`].
//!
//! Rules, first match wins:
//!
//! 1. no HTTP response → [`NodeResult::TransportError`]
//! 2. status ≠ 200 → [`NodeResult::UpstreamError`] carrying the status
//! 3. 200 with a body that is not JSON → [`NodeResult::TransportError`]
//! 4. non-null `error` field → [`NodeResult::UpstreamError`] without status
//! 5. `result` key with a non-empty value → [`NodeResult::Success`]`(result)`
//! 6. `result` key that is `null` or empty → [`NodeResult::NotFound`]
//! 7. anything else (plain REST body) → [`NodeResult::Success`]`(body)`

use serde_json::Value;

use super::client::{RawBody, RawResult};

/// Uniform outcome of one node call.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeResult {
    Success(Value),
    /// The node answered but had nothing for the request.
    NotFound,
    /// The node reported a failure.
    ///
    /// `status` is the HTTP status for non-200 responses and `None` for an
    /// RPC-level `error` field in a 200 response.
    UpstreamError {
        status: Option<u16>,
        message: String,
    },
    /// No usable response was received.
    TransportError(String),
}

impl NodeResult {
    /// The payload on success; every failure collapses to `None`.
    pub fn success(self) -> Option<Value> {
        match self {
            NodeResult::Success(v) => Some(v),
            _ => None,
        }
    }
}

/// Interpret a raw node response.
pub fn normalize(raw: RawResult) -> NodeResult {
    let response = match raw {
        Ok(r) => r,
        Err(e) => return NodeResult::TransportError(e.to_string()),
    };

    if response.status != 200 {
        return NodeResult::UpstreamError {
            status: Some(response.status),
            message: format!("status {}", response.status),
        };
    }

    let body = match response.body {
        RawBody::Json(v) => v,
        RawBody::Bytes(_) => {
            return NodeResult::TransportError("malformed JSON from node".into());
        }
    };

    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        return NodeResult::UpstreamError {
            status: None,
            message: rpc_error_message(error),
        };
    }

    match body {
        Value::Object(mut map) if map.contains_key("result") => {
            match map.remove("result") {
                Some(result) if !is_empty(&result) => NodeResult::Success(result),
                _ => NodeResult::NotFound,
            }
        }
        other => NodeResult::Success(other),
    }
}

/// `error.message` when the node sent a structured error, otherwise the
/// error value itself as text.
fn rpc_error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(obj) => match obj.get("message").and_then(Value::as_str) {
            Some(msg) => msg.to_string(),
            None => error.to_string(),
        },
        other => other.to_string(),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
