//! Handshake name handlers.
//!
//! `name`, `namehash`, and `nameresource` map to one RPC call each;
//! `namesummary` is assembled by [`crate::summary::NameSummaryAggregator`].

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{error::AppError, resolve::Resource};

use super::{serve, AppState};

/// `GET /api/v1/name/{name}` — RPC `getnameinfo`.
pub async fn name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, Resource::Name { name }).await
}

/// `GET /api/v1/namehash/{hash}` — RPC `getnamebyhash`.
pub async fn name_by_hash(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, Resource::NameByHash { hash }).await
}

/// `GET /api/v1/nameresource/{name}` — RPC `getnameresource`.
pub async fn name_resource(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, Resource::NameResource { name }).await
}

/// `GET /api/v1/namesummary/{name}`
///
/// Always answers with a [`hsd_gateway_api::NameSummary`] body: 200 when the
/// name info call completed or failed outright (see `error`), 404 when the
/// node has no such name or no `info` for it.
pub async fn name_summary(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, Resource::NameSummary { name }).await
}
