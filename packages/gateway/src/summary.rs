//! Name summary aggregation — `GET /api/v1/namesummary/{name}`.
//!
//! A summary is assembled from up to four node calls:
//!
//! | step | call | depends on | on failure |
//! |------|------|------------|------------|
//! | name info | RPC `getnameinfo(name)` | — | terminal, sets `error` |
//! | owner | `GET /coin/{hash}/{index}` | name info `owner` | `owner` stays `null` |
//! | mint time | `GET /header/{height}` | name info `height` | `mintTimestamp`/`mintDate` stay `null` |
//! | resources | RPC `getnameresource(name)` | — | `resources` stays `[]` |
//!
//! The resource lookup runs concurrently with the name info chain. Owner and
//! mint time run concurrently with each other once name info is known.

use std::sync::Arc;

use chrono::DateTime;
use hsd_gateway_api::{NameSummary, DOLLARYDOOS_PER_HNS};
use serde_json::{Map, Value};
use tracing::debug;

use crate::upstream::{normalize, NodeApi, NodeResult, UpstreamCall};

pub const NAME_SUMMARY_NOT_FOUND: &str = "Name summary not found";
pub const NAME_INFO_NOT_FOUND: &str = "Name info not found";

/// How far the summary got before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Name info resolved; secondary fields are best-effort.
    Complete,
    /// The name info call failed in transport or at the node.
    NameInfoFailed,
    /// The node returned an empty name info result.
    NameNotFound,
    /// Name info came back without an `info` object.
    InfoMissing,
}

/// A summary record and the outcome that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub record: NameSummary,
    pub outcome: Outcome,
}

/// Builds [`NameSummary`] records from a node.
#[derive(Clone)]
pub struct NameSummaryAggregator {
    node: Arc<dyn NodeApi>,
}

/// Fields read directly from the name info `info` object.
#[derive(Debug, Default)]
struct NameFacts {
    height: Option<u64>,
    hash: Option<String>,
    state: Option<String>,
    value: Option<f64>,
    blocks_until_expire: Option<i64>,
    /// `(owner.hash, owner.index)`, only when both are present.
    owner_outpoint: Option<(Value, Value)>,
}

/// A terminal failure of the name info step.
enum NameInfoFailure {
    Failed(String),
    NotFound,
    InfoMissing,
}

impl NameSummaryAggregator {
    pub fn new(node: Arc<dyn NodeApi>) -> Self {
        Self { node }
    }

    /// Build the summary for `name`. Never fails; problems resolving the name
    /// itself are reported through [`NameSummary::error`] and [`Outcome`].
    pub async fn summarize(&self, name: &str) -> Summary {
        let (info, resources) = tokio::join!(self.name_facts(name), self.resources(name));

        let mut record = NameSummary::new(name);
        let facts = match info {
            Ok(facts) => facts,
            Err(failure) => {
                let (outcome, message) = match failure {
                    NameInfoFailure::Failed(msg) => (Outcome::NameInfoFailed, msg),
                    NameInfoFailure::NotFound => {
                        (Outcome::NameNotFound, NAME_SUMMARY_NOT_FOUND.to_string())
                    }
                    NameInfoFailure::InfoMissing => {
                        (Outcome::InfoMissing, NAME_INFO_NOT_FOUND.to_string())
                    }
                };
                debug!("namesummary: {name}: {message}");
                record.error = Some(message);
                return Summary { record, outcome };
            }
        };

        let (owner, mint_timestamp) = tokio::join!(
            self.owner_address(facts.owner_outpoint.as_ref()),
            self.mint_timestamp(facts.height),
        );

        record.height = facts.height;
        record.hash = facts.hash;
        if let Some(state) = facts.state {
            record.state = state;
        }
        record.value = facts.value;
        record.blocks_until_expire = facts.blocks_until_expire;
        record.owner = owner;
        set_mint_time(&mut record, mint_timestamp);
        record.resources = resources;

        Summary {
            record,
            outcome: Outcome::Complete,
        }
    }

    async fn fetch(&self, call: UpstreamCall) -> NodeResult {
        normalize(self.node.call(&call).await)
    }

    async fn name_facts(&self, name: &str) -> Result<NameFacts, NameInfoFailure> {
        let result = match self.fetch(UpstreamCall::rpc("getnameinfo", [name])).await {
            NodeResult::Success(result) => result,
            NodeResult::NotFound => return Err(NameInfoFailure::NotFound),
            NodeResult::UpstreamError { message, .. } | NodeResult::TransportError(message) => {
                return Err(NameInfoFailure::Failed(message));
            }
        };

        match result.get("info") {
            Some(Value::Object(info)) => Ok(NameFacts::from_info(info)),
            _ => Err(NameInfoFailure::InfoMissing),
        }
    }

    async fn owner_address(&self, outpoint: Option<&(Value, Value)>) -> Option<String> {
        let (hash, index) = outpoint?;
        let call = UpstreamCall::get("coin", [hash.clone(), index.clone()]);
        let coin = self.soft_fetch(call, "owner").await?;
        coin.get("address").and_then(Value::as_str).map(str::to_string)
    }

    async fn mint_timestamp(&self, height: Option<u64>) -> Option<i64> {
        let call = UpstreamCall::get("header", [height?]);
        let header = self.soft_fetch(call, "mint time").await?;
        header.get("time").and_then(Value::as_i64)
    }

    async fn resources(&self, name: &str) -> Vec<Value> {
        let call = UpstreamCall::rpc("getnameresource", [name]);
        match self.soft_fetch(call, "resources").await {
            Some(Value::Array(items)) => items,
            Some(single) => vec![single],
            None => Vec::new(),
        }
    }

    /// Fetch for a best-effort field: any failure becomes `None`.
    async fn soft_fetch(&self, call: UpstreamCall, field: &str) -> Option<Value> {
        match self.fetch(call).await {
            NodeResult::Success(v) => Some(v),
            other => {
                debug!("namesummary: {field} lookup skipped: {other:?}");
                None
            }
        }
    }
}

impl NameFacts {
    fn from_info(info: &Map<String, Value>) -> Self {
        let owner_outpoint = info.get("owner").and_then(|owner| {
            let hash = owner.get("hash").filter(|v| !v.is_null())?;
            let index = owner.get("index").filter(|v| !v.is_null())?;
            Some((hash.clone(), index.clone()))
        });

        Self {
            height: info.get("height").and_then(Value::as_u64),
            hash: info.get("nameHash").and_then(Value::as_str).map(str::to_string),
            state: info.get("state").and_then(Value::as_str).map(str::to_string),
            value: info.get("value").and_then(Value::as_f64).map(to_hns),
            blocks_until_expire: info
                .get("stats")
                .and_then(|stats| stats.get("blocksUntilExpire"))
                .and_then(Value::as_i64),
            owner_outpoint,
        }
    }
}

/// Convert a node amount (dollarydoos) to HNS.
pub fn to_hns(dollarydoos: f64) -> f64 {
    dollarydoos / DOLLARYDOOS_PER_HNS
}

/// Set `mintTimestamp` and `mintDate` together, or neither.
fn set_mint_time(record: &mut NameSummary, timestamp: Option<i64>) {
    let date = timestamp
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.to_rfc3339());
    match (timestamp, date) {
        (Some(ts), Some(date)) => {
            record.mint_timestamp = Some(ts);
            record.mint_date = Some(date);
        }
        _ => {
            record.mint_timestamp = None;
            record.mint_date = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::upstream::scripted::ScriptedNode;

    fn woodburn_node() -> ScriptedNode {
        ScriptedNode::new()
            .rpc_result(
                "getnameinfo",
                "woodburn",
                json!({
                    "start": { "reserved": false },
                    "info": {
                        "name": "woodburn",
                        "height": 210241,
                        "nameHash": "abc",
                        "state": "CLOSING",
                        "value": 5000000,
                        "stats": { "blocksUntilExpire": 10 },
                        "owner": { "hash": "h1", "index": 0 }
                    }
                }),
            )
            .ok(UpstreamCall::get("header", [210241u64]), json!({ "time": 1700000000 }))
            .ok(UpstreamCall::get("coin", [json!("h1"), json!(0)]), json!({ "address": "hs1q..." }))
            .rpc_result("getnameresource", "woodburn", json!({ "ttl": 3600 }))
    }

    async fn summarize(node: ScriptedNode, name: &str) -> (Summary, Arc<ScriptedNode>) {
        let node = Arc::new(node);
        let summary = NameSummaryAggregator::new(node.clone()).summarize(name).await;
        assert_eq!(
            summary.record.mint_date.is_some(),
            summary.record.mint_timestamp.is_some(),
            "mintDate must be present iff mintTimestamp is"
        );
        (summary, node)
    }

    #[tokio::test]
    async fn full_summary_merges_every_lookup() {
        let (summary, _) = summarize(woodburn_node(), "woodburn").await;
        let r = summary.record;

        assert_eq!(summary.outcome, Outcome::Complete);
        assert_eq!(r.name, "woodburn");
        assert_eq!(r.height, Some(210241));
        assert_eq!(r.hash.as_deref(), Some("abc"));
        assert_eq!(r.state, "CLOSING");
        assert_eq!(r.value, Some(5.0));
        assert_eq!(r.blocks_until_expire, Some(10));
        assert_eq!(r.owner.as_deref(), Some("hs1q..."));
        assert_eq!(r.mint_timestamp, Some(1700000000));
        assert_eq!(r.mint_date.as_deref(), Some("2023-11-14T22:13:20+00:00"));
        assert_eq!(r.resources, vec![json!({ "ttl": 3600 })]);
        assert_eq!(r.error, None);
    }

    #[tokio::test]
    async fn empty_name_info_is_not_found() {
        let node = ScriptedNode::new()
            .rpc_result("getnameinfo", "ghost", json!(null))
            .rpc_result("getnameresource", "ghost", json!([{ "ttl": 1 }]));
        let (summary, _) = summarize(node, "ghost").await;

        assert_eq!(summary.outcome, Outcome::NameNotFound);
        let mut expected = NameSummary::new("ghost");
        expected.error = Some("Name summary not found".into());
        assert_eq!(summary.record, expected);
    }

    #[tokio::test]
    async fn missing_info_object_is_its_own_terminal_state() {
        let node = ScriptedNode::new().rpc_result(
            "getnameinfo",
            "reserved",
            json!({ "start": { "reserved": true }, "info": null }),
        );
        let (summary, node) = summarize(node, "reserved").await;

        assert_eq!(summary.outcome, Outcome::InfoMissing);
        assert_eq!(summary.record.error.as_deref(), Some("Name info not found"));
        assert_eq!(summary.record.height, None);
        assert_eq!(summary.record.hash, None);
        assert_eq!(summary.record.state, "CLOSED");
        // Only the two independent RPC calls were made.
        assert_eq!(node.calls().len(), 2);
    }

    #[tokio::test]
    async fn name_info_transport_failure_sets_error_and_keeps_defaults() {
        let node = ScriptedNode::new()
            .unreachable(UpstreamCall::rpc("getnameinfo", ["woodburn"]))
            .rpc_result("getnameresource", "woodburn", json!({ "ttl": 3600 }));
        let (summary, _) = summarize(node, "woodburn").await;

        assert_eq!(summary.outcome, Outcome::NameInfoFailed);
        let mut expected = NameSummary::new("woodburn");
        expected.error = Some("connection refused".into());
        assert_eq!(summary.record, expected);
    }

    #[tokio::test]
    async fn name_info_rpc_error_message_is_surfaced() {
        let node = ScriptedNode::new().ok(
            UpstreamCall::rpc("getnameinfo", ["bad name"]),
            json!({ "result": null, "error": { "message": "Invalid name.", "code": -8 } }),
        );
        let (summary, _) = summarize(node, "bad name").await;

        assert_eq!(summary.outcome, Outcome::NameInfoFailed);
        assert_eq!(summary.record.error.as_deref(), Some("Invalid name."));
    }

    #[tokio::test]
    async fn owner_lookup_failure_is_swallowed() {
        let node = ScriptedNode::new()
            .unreachable(UpstreamCall::get("coin", [json!("h1"), json!(0)]))
            .rpc_result(
                "getnameinfo",
                "woodburn",
                json!({ "info": {
                    "height": 210241,
                    "owner": { "hash": "h1", "index": 0 }
                } }),
            )
            .ok(UpstreamCall::get("header", [210241u64]), json!({ "time": 1700000000 }));
        let (summary, _) = summarize(node, "woodburn").await;

        assert_eq!(summary.outcome, Outcome::Complete);
        assert_eq!(summary.record.owner, None);
        assert_eq!(summary.record.error, None);
        assert_eq!(summary.record.mint_timestamp, Some(1700000000));
    }

    #[tokio::test]
    async fn header_failure_leaves_mint_fields_absent() {
        let node = ScriptedNode::new()
            .rpc_result("getnameinfo", "woodburn", json!({ "info": { "height": 7 } }))
            .status(UpstreamCall::get("header", [7u64]), 500);
        let (summary, _) = summarize(node, "woodburn").await;

        assert_eq!(summary.record.height, Some(7));
        assert_eq!(summary.record.mint_timestamp, None);
        assert_eq!(summary.record.mint_date, None);
        assert_eq!(summary.record.error, None);
    }

    #[tokio::test]
    async fn dependent_lookups_are_skipped_without_inputs() {
        let node = ScriptedNode::new().rpc_result(
            "getnameinfo",
            "woodburn",
            json!({ "info": { "state": "OPENING", "owner": { "hash": "h1" } } }),
        );
        let (summary, node) = summarize(node, "woodburn").await;

        assert_eq!(summary.record.state, "OPENING");
        let methods: Vec<String> = node.calls().into_iter().map(|c| c.method).collect();
        assert!(!methods.iter().any(|m| m == "coin" || m == "header"), "{methods:?}");
    }

    #[tokio::test]
    async fn resource_array_is_used_as_is_and_errors_leave_it_empty() {
        let node = ScriptedNode::new()
            .rpc_result("getnameinfo", "a", json!({ "info": {} }))
            .rpc_result("getnameresource", "a", json!([{ "ttl": 1 }, { "ttl": 2 }]));
        let (summary, _) = summarize(node, "a").await;
        assert_eq!(summary.record.resources, vec![json!({ "ttl": 1 }), json!({ "ttl": 2 })]);

        let node = ScriptedNode::new()
            .rpc_result("getnameinfo", "b", json!({ "info": {} }))
            .ok(
                UpstreamCall::rpc("getnameresource", ["b"]),
                json!({ "result": null, "error": { "message": "boom" } }),
            );
        let (summary, _) = summarize(node, "b").await;
        assert!(summary.record.resources.is_empty());
        assert_eq!(summary.record.error, None);
        assert_eq!(summary.record.state, "CLOSED");
    }

    #[test]
    fn value_conversion_is_exact_division() {
        assert_eq!(to_hns(0.0), 0.0);
        assert_eq!(to_hns(1.0), 0.000001);
        assert_eq!(to_hns(5_000_000.0), 5.0);
        assert_eq!(to_hns(1_234_567.0), 1_234_567.0 / 1_000_000.0);
    }

    #[test]
    fn out_of_range_timestamp_clears_both_mint_fields() {
        let mut record = NameSummary::new("x");
        set_mint_time(&mut record, Some(i64::MAX));
        assert_eq!(record.mint_timestamp, None);
        assert_eq!(record.mint_date, None);

        set_mint_time(&mut record, Some(0));
        assert_eq!(record.mint_timestamp, Some(0));
        assert_eq!(record.mint_date.as_deref(), Some("1970-01-01T00:00:00+00:00"));
    }
}
