//! Endpoint listing — `GET /api/v1/help`.

use serde::{Deserialize, Serialize};

/// One documented endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub endpoint: String,
    pub description: String,
}

/// Response body for `GET /api/v1/help`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelpResponse {
    pub api: Vec<ApiEndpoint>,
}

const ENDPOINTS: &[(&str, &str)] = &[
    ("/api/v1/status", "Check HSD node status"),
    ("/api/v1/chain", "Get chain status"),
    ("/api/v1/mempool", "Get mempool status"),
    ("/api/v1/block/<blockid>", "Get block data by block height or hash"),
    ("/api/v1/header/<blockid>", "Get header data by block height or hash"),
    ("/api/v1/coin/<coinhash>/<index>", "Get coin info"),
    ("/api/v1/coin/address/<address>", "Get coins for address"),
    ("/api/v1/tx/<txid>", "Get transaction info"),
    ("/api/v1/tx/address/<address>", "Get transactions for address"),
    ("/api/v1/name/<name>", "Get name info"),
    ("/api/v1/namehash/<namehash>", "Get name by hash"),
    ("/api/v1/nameresource/<name>", "Get name resource"),
    ("/api/v1/namesummary/<name>", "Get a summary of a name"),
    ("/api/v1/help", "List all API endpoints"),
];

impl HelpResponse {
    /// The full endpoint table served by the gateway.
    pub fn catalogue() -> Self {
        Self {
            api: ENDPOINTS
                .iter()
                .map(|(endpoint, description)| ApiEndpoint {
                    endpoint: (*endpoint).to_string(),
                    description: (*description).to_string(),
                })
                .collect(),
        }
    }
}
