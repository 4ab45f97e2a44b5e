//! Name summary type — `GET /api/v1/namesummary/{name}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State reported for a name when the node did not provide one.
pub const DEFAULT_NAME_STATE: &str = "CLOSED";

/// Node amounts are integers in dollarydoos; one HNS is this many of them.
pub const DOLLARYDOOS_PER_HNS: f64 = 1_000_000.0;

/// Composite view of a Handshake name assembled from several node calls.
///
/// Every key is always present; fields the gateway could not determine are
/// `null`. `error` is only set when the name itself could not be resolved.
///
/// ```json
/// {
///   "name": "woodburn",
///   "height": 210241,
///   "hash": "abc",
///   "state": "CLOSING",
///   "value": 5.0,
///   "blocksUntilExpire": 10,
///   "owner": "hs1q...",
///   "mintTimestamp": 1700000000,
///   "mintDate": "2023-11-14T22:13:20+00:00",
///   "resources": [{ "ttl": 3600 }],
///   "error": null
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NameSummary {
    pub name: String,
    pub height: Option<u64>,
    pub hash: Option<String>,
    pub state: String,
    /// Name value in HNS (node value ÷ [`DOLLARYDOOS_PER_HNS`]).
    pub value: Option<f64>,
    pub blocks_until_expire: Option<i64>,
    /// Address holding the name's owner output.
    pub owner: Option<String>,
    /// Unix time of the block at `height`.
    pub mint_timestamp: Option<i64>,
    /// `mint_timestamp` as an RFC 3339 UTC string. Present iff `mint_timestamp` is.
    pub mint_date: Option<String>,
    #[serde(default)]
    pub resources: Vec<Value>,
    pub error: Option<String>,
}

impl NameSummary {
    /// An empty summary for `name`: state `CLOSED`, no resources, all else `null`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            height: None,
            hash: None,
            state: DEFAULT_NAME_STATE.to_string(),
            value: None,
            blocks_until_expire: None,
            owner: None,
            mint_timestamp: None,
            mint_date: None,
            resources: Vec::new(),
            error: None,
        }
    }
}
