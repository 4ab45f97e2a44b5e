//! Node status types — `GET /api/v1/status` and `GET /api/v1/chain`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Digest of the node's root status object.
///
/// ```json
/// {
///   "status": "HSD is running",
///   "version": "6.1.1",
///   "progress": 1.0,
///   "inbound": 4,
///   "outbound": 8,
///   "agent": "/hsd:6.1.1/"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusDigest {
    pub status: String,
    pub version: String,
    pub progress: f64,
    pub inbound: u64,
    pub outbound: u64,
    pub agent: String,
}

impl StatusDigest {
    pub const RUNNING: &'static str = "HSD is running";

    /// Build the digest from the node's root object, substituting defaults
    /// for every missing or mistyped field.
    pub fn from_node_root(root: &Value) -> Self {
        let pool = &root["pool"];
        Self {
            status: Self::RUNNING.to_string(),
            version: root["version"].as_str().unwrap_or("unknown").to_string(),
            progress: root["chain"]["progress"].as_f64().unwrap_or(0.0),
            inbound: pool["inbound"].as_u64().unwrap_or(0),
            outbound: pool["outbound"].as_u64().unwrap_or(0),
            agent: pool["agent"].as_str().unwrap_or("unknown").to_string(),
        }
    }
}

/// `GET /api/v1/chain` body: the node's `chain` subtree, wrapped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainResponse {
    pub chain: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn digest_picks_nested_fields() {
        let root = json!({
            "version": "6.1.1",
            "chain": { "height": 210241, "progress": 0.5 },
            "pool": { "inbound": 3, "outbound": 8, "agent": "/hsd:6.1.1/" }
        });
        let d = StatusDigest::from_node_root(&root);
        assert_eq!(d.status, "HSD is running");
        assert_eq!(d.version, "6.1.1");
        assert_eq!(d.progress, 0.5);
        assert_eq!(d.inbound, 3);
        assert_eq!(d.outbound, 8);
        assert_eq!(d.agent, "/hsd:6.1.1/");
    }

    #[test]
    fn digest_defaults_missing_fields() {
        let d = StatusDigest::from_node_root(&json!({}));
        assert_eq!(d.version, "unknown");
        assert_eq!(d.progress, 0.0);
        assert_eq!(d.inbound, 0);
        assert_eq!(d.outbound, 0);
        assert_eq!(d.agent, "unknown");
    }
}
