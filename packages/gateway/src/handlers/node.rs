//! Node-level handlers — status, chain, mempool, and the endpoint listing.

use axum::{extract::State, response::Response, Json};
use hsd_gateway_api::HelpResponse;

use crate::{error::AppError, resolve::Resource};

use super::{serve, AppState};

/// `GET /api/v1/status` — digest of the node's root status object.
pub async fn status(State(state): State<AppState>) -> Result<Response, AppError> {
    serve(&state, Resource::Status).await
}

/// `GET /api/v1/chain` — the node's `chain` subtree.
pub async fn chain(State(state): State<AppState>) -> Result<Response, AppError> {
    serve(&state, Resource::Chain).await
}

/// `GET /api/v1/mempool`
pub async fn mempool(State(state): State<AppState>) -> Result<Response, AppError> {
    serve(&state, Resource::Mempool).await
}

/// `GET /api/v1/help` — every endpoint with a short description.
pub async fn help() -> Json<HelpResponse> {
    Json(HelpResponse::catalogue())
}
