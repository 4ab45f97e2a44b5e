//! Upstream HSD node access.
//!
//! The node speaks two conventions at once: plain REST `GET` endpoints that
//! return their payload directly, and a single JSON-RPC `POST /` endpoint
//! that wraps payloads in `{ "result": ..., "error": ... }`.
//!
//! - [`client`] issues raw calls through the [`NodeApi`] seam.
//! - [`normalize`] folds both conventions into one [`NodeResult`].

pub mod client;
pub mod normalize;

#[cfg(test)]
pub(crate) mod scripted;

pub use client::{
    ClientError, HttpVerb, NodeApi, NodeClient, RawBody, RawResponse, RawResult, TransportError,
    UpstreamCall,
};
pub use normalize::{normalize, NodeResult};
