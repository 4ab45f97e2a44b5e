//! Chain data handlers — blocks, headers, coins, and transactions.
//!
//! All of these are straight passthroughs to the node's REST endpoints.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{error::AppError, resolve::Resource};

use super::{serve, AppState};

/// `GET /api/v1/{datatype}/{id}` where `datatype` is `block` or `header`.
///
/// Any other datatype is rejected with 400 before the node is contacted.
pub async fn block_data(
    State(state): State<AppState>,
    Path((datatype, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let resource = Resource::block_data(&datatype, id)?;
    serve(&state, resource).await
}

/// `GET /api/v1/coin/{hash}/{index}`
pub async fn coin(
    State(state): State<AppState>,
    Path((hash, index)): Path<(String, String)>,
) -> Result<Response, AppError> {
    serve(&state, Resource::Coin { hash, index }).await
}

/// `GET /api/v1/coin/address/{address}`
pub async fn coins_by_address(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, Resource::CoinsByAddress { address }).await
}

/// `GET /api/v1/tx/{id}`
pub async fn tx(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, Resource::Tx { id }).await
}

/// `GET /api/v1/tx/address/{address}`
pub async fn txs_by_address(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Response, AppError> {
    serve(&state, Resource::TxsByAddress { address }).await
}
