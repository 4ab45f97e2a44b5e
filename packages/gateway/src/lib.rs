//! Public surface for the `hsd-gateway` crate.
//!
//! Exposes the router builder, the node client, and config types so that
//! external crates (e.g. the conformance test suite) can spin up an
//! in-process gateway without spawning a subprocess.

pub mod config;
pub mod error;
pub mod handlers;
pub mod resolve;
pub mod router;
pub mod summary;
pub mod upstream;

pub use config::{GatewayConfig, NodeConfig};
pub use router::build_router;
pub use summary::NameSummaryAggregator;
pub use upstream::{ClientError, NodeApi, NodeClient};
