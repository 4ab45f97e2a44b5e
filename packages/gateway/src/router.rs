//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use hsd_gateway_api::{error::messages, ErrorResponse};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{chain, names, node, AppState},
    upstream::NodeApi,
};

/// Build the complete application router over `node`.
pub fn build_router(node: Arc<dyn NodeApi>) -> Router {
    let state = AppState::new(node);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        // Node
        .route("/api/v1/status", get(node::status))
        .route("/api/v1/chain", get(node::chain))
        .route("/api/v1/mempool", get(node::mempool))
        .route("/api/v1/help", get(node::help))
        // Chain data
        .route("/api/v1/{datatype}/{id}", get(chain::block_data))
        .route("/api/v1/coin/{hash}/{index}", get(chain::coin))
        .route("/api/v1/coin/address/{address}", get(chain::coins_by_address))
        .route("/api/v1/tx/{id}", get(chain::tx))
        .route("/api/v1/tx/address/{address}", get(chain::txs_by_address))
        // Names
        .route("/api/v1/name/{name}", get(names::name))
        .route("/api/v1/namehash/{hash}", get(names::name_by_hash))
        .route("/api/v1/nameresource/{name}", get(names::name_resource))
        .route("/api/v1/namesummary/{name}", get(names::name_summary))
        .fallback(endpoint_not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(messages::ENDPOINT_NOT_FOUND)),
    )
}
