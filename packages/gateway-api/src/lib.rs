//! Response types for the HSD gateway REST API.
//!
//! This crate encodes the outward `/api/v1` contract as Rust types so the
//! gateway and its conformance suite agree on every JSON shape.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `/api/v1/status` | → [`StatusDigest`] |
//! | GET | `/api/v1/chain` | → [`ChainResponse`] |
//! | GET | `/api/v1/mempool` | → node JSON |
//! | GET | `/api/v1/{block,header}/{id}` | → node JSON |
//! | GET | `/api/v1/coin/{hash}/{index}` | → node JSON |
//! | GET | `/api/v1/coin/address/{address}` | → node JSON |
//! | GET | `/api/v1/tx/{id}` | → node JSON |
//! | GET | `/api/v1/tx/address/{address}` | → node JSON |
//! | GET | `/api/v1/name/{name}` | → RPC `getnameinfo` result |
//! | GET | `/api/v1/namehash/{hash}` | → RPC `getnamebyhash` result |
//! | GET | `/api/v1/nameresource/{name}` | → RPC `getnameresource` result |
//! | GET | `/api/v1/namesummary/{name}` | → [`NameSummary`] |
//! | GET | `/api/v1/help` | → [`HelpResponse`] |
//!
//! Every failure is an [`ErrorResponse`].

pub mod error;
pub mod help;
pub mod name;
pub mod status;

pub use error::ErrorResponse;
pub use help::{ApiEndpoint, HelpResponse};
pub use name::{NameSummary, DEFAULT_NAME_STATE, DOLLARYDOOS_PER_HNS};
pub use status::{ChainResponse, StatusDigest};
