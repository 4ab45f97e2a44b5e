//! Maps outward API resources onto node calls.
//!
//! Every `/api/v1` resource except the name summary is a passthrough: one
//! [`UpstreamCall`], plus a [`Shape`] describing how the successful payload
//! is projected into the outward body. The summary is delegated to
//! [`crate::summary::NameSummaryAggregator`].

use std::fmt;
use std::str::FromStr;

use hsd_gateway_api::{ChainResponse, StatusDigest};
use serde_json::Value;

use crate::upstream::UpstreamCall;

/// A caller-supplied parameter was rejected before any node call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid datatype {0:?}: expected \"block\" or \"header\"")]
    InvalidDatatype(String),
    /// Empty, `.` or `..`: the node's URL parser would treat it as a path step.
    #[error("invalid path segment {0:?}")]
    InvalidSegment(String),
}

/// Accept a path parameter that is forwarded as one segment of a node REST path.
fn segment(value: &str) -> Result<&str, ValidationError> {
    match value {
        "" | "." | ".." => Err(ValidationError::InvalidSegment(value.to_string())),
        ok => Ok(ok),
    }
}

/// The `{datatype}` segment of `/api/v1/{datatype}/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Block,
    Header,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Block => "block",
            DataType::Header => "header",
        }
    }
}

impl FromStr for DataType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(DataType::Block),
            "header" => Ok(DataType::Header),
            other => Err(ValidationError::InvalidDatatype(other.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outward API resource with its path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Status,
    Chain,
    Mempool,
    BlockData { datatype: DataType, id: String },
    Coin { hash: String, index: String },
    CoinsByAddress { address: String },
    Tx { id: String },
    TxsByAddress { address: String },
    Name { name: String },
    NameByHash { hash: String },
    NameResource { name: String },
    NameSummary { name: String },
}

impl Resource {
    /// `/{datatype}/{id}`, rejecting any datatype other than `block` or `header`.
    pub fn block_data(datatype: &str, id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Resource::BlockData {
            datatype: datatype.parse()?,
            id: id.into(),
        })
    }

    /// Decide how this resource is served. Parameters forwarded as REST path
    /// segments are checked here, before any node call.
    pub fn resolve(&self) -> Result<Resolution, ValidationError> {
        let route = match self {
            Resource::Status => Route::new(UpstreamCall::root(), "HSD is not running")
                .shape(Shape::StatusDigest),
            Resource::Chain => Route::new(UpstreamCall::root(), "Failed to get chain status")
                .shape(Shape::ChainSubtree)
                .not_found("Chain status not found in response"),
            Resource::Mempool => Route::new(
                UpstreamCall::get("mempool", Vec::<Value>::new()),
                "Failed to get mempool",
            )
            .not_found("Mempool not found"),
            Resource::BlockData { datatype, id } => Route::new(
                UpstreamCall::get(datatype.as_str(), [segment(id)?]),
                format!("Failed to get {datatype}"),
            )
            .not_found(match datatype {
                DataType::Block => "Block not found",
                DataType::Header => "Header not found",
            }),
            Resource::Coin { hash, index } => Route::new(
                UpstreamCall::get("coin", [segment(hash)?, segment(index)?]),
                "Failed to get coin data",
            )
            .not_found("Coin not found"),
            Resource::CoinsByAddress { address } => Route::new(
                UpstreamCall::get("coin/address", [segment(address)?]),
                "Failed to get coins for address",
            )
            .not_found("Coins not found"),
            Resource::Tx { id } => Route::new(
                UpstreamCall::get("tx", [segment(id)?]),
                "Failed to get transaction data",
            )
            .not_found("Transaction not found"),
            Resource::TxsByAddress { address } => Route::new(
                UpstreamCall::get("tx/address", [segment(address)?]),
                "Failed to get transactions for address",
            )
            .not_found("Transactions not found"),
            Resource::Name { name } => Route::new(
                UpstreamCall::rpc("getnameinfo", [name.as_str()]),
                "Failed to get name data",
            )
            .not_found("Name not found"),
            Resource::NameByHash { hash } => Route::new(
                UpstreamCall::rpc("getnamebyhash", [hash.as_str()]),
                "Failed to get name data",
            )
            .not_found("Name not found"),
            Resource::NameResource { name } => Route::new(
                UpstreamCall::rpc("getnameresource", [name.as_str()]),
                "Failed to get name resource",
            )
            .not_found("Resource not found"),
            Resource::NameSummary { name } => return Ok(Resolution::Summary(name.clone())),
        };
        Ok(Resolution::Passthrough(route))
    }
}

/// Outcome of [`Resource::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Served by exactly one node call.
    Passthrough(Route),
    /// Served by the name summary aggregator.
    Summary(String),
}

/// How a successful payload becomes the outward body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Raw,
    StatusDigest,
    ChainSubtree,
}

/// A passthrough resource: the node call and its outward messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub call: UpstreamCall,
    pub shape: Shape,
    /// Body message when the node has nothing for the request.
    pub not_found: String,
    /// Body message when the node answers with a non-200 status.
    pub failure: String,
}

impl Route {
    fn new(call: UpstreamCall, failure: impl Into<String>) -> Self {
        Self {
            call,
            shape: Shape::Raw,
            not_found: "Not found".into(),
            failure: failure.into(),
        }
    }

    fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    fn not_found(mut self, message: impl Into<String>) -> Self {
        self.not_found = message.into();
        self
    }

    /// Project a successful payload. `None` means the expected subtree is
    /// missing and the resource should be reported as not found.
    pub fn project(&self, payload: Value) -> Option<Value> {
        match self.shape {
            Shape::Raw => Some(payload),
            Shape::StatusDigest => {
                serde_json::to_value(StatusDigest::from_node_root(&payload)).ok()
            }
            Shape::ChainSubtree => {
                let chain = match payload {
                    Value::Object(mut root) => root.remove("chain")?,
                    _ => return None,
                };
                serde_json::to_value(ChainResponse { chain }).ok()
            }
        }
    }
}
