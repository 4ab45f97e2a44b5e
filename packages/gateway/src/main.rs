//! `hsd-gateway` — REST gateway over an HSD full node.
//!
//! # Quick start
//!
//! ```sh
//! # Node on localhost with the default HTTP port:
//! hsd-gateway
//!
//! # Remote node with an API key, custom bind address:
//! HSD_HOST=10.0.0.5 HSD_API_KEY=... GATEWAY_BIND=0.0.0.0:8080 hsd-gateway
//! ```
//!
//! # Environment variables
//!
//! See [`hsd_gateway::GatewayConfig::from_env`] for the full list.

use std::sync::Arc;

use hsd_gateway::{build_router, GatewayConfig, NodeApi, NodeClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hsd_gateway=info,tower_http=debug".into()),
        )
        .init();

    let config = GatewayConfig::from_env().unwrap_or_else(|e| panic!("invalid configuration: {e}"));

    let client = NodeClient::new(&config.node)
        .unwrap_or_else(|e| panic!("upstream node {}: {e}", config.node.display_url()));
    tracing::info!("upstream node: {}", config.node.display_url());

    let node: Arc<dyn NodeApi> = Arc::new(client);
    let app = build_router(node);

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    axum::serve(listener, app).await.expect("server error");
}
