//! In-memory [`NodeApi`] for tests: canned responses plus a call log.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::{NodeApi, RawResponse, RawResult, TransportError, UpstreamCall};

#[derive(Default)]
pub(crate) struct ScriptedNode {
    replies: Vec<(UpstreamCall, RawResult)>,
    calls: Mutex<Vec<UpstreamCall>>,
}

impl ScriptedNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reply to `call` with a 200 JSON body.
    pub(crate) fn ok(self, call: UpstreamCall, body: Value) -> Self {
        self.reply(call, Ok(RawResponse::json(200, body)))
    }

    /// Reply to an RPC call with `{"result": result, "error": null}`.
    pub(crate) fn rpc_result(self, method: &str, arg: &str, result: Value) -> Self {
        self.ok(
            UpstreamCall::rpc(method, [arg]),
            json!({ "result": result, "error": null }),
        )
    }

    pub(crate) fn status(self, call: UpstreamCall, status: u16) -> Self {
        self.reply(call, Ok(RawResponse::json(status, json!({ "error": "scripted" }))))
    }

    pub(crate) fn unreachable(self, call: UpstreamCall) -> Self {
        self.reply(call, Err(TransportError("connection refused".into())))
    }

    pub(crate) fn reply(mut self, call: UpstreamCall, result: RawResult) -> Self {
        self.replies.push((call, result));
        self
    }

    pub(crate) fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeApi for ScriptedNode {
    async fn call(&self, call: &UpstreamCall) -> RawResult {
        self.calls.lock().unwrap().push(call.clone());
        self.replies
            .iter()
            .find(|(c, _)| c == call)
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| Ok(RawResponse::json(404, json!({ "error": "not scripted" }))))
    }
}
