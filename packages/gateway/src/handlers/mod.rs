//! HTTP request handlers for the `/api/v1` surface.
//!
//! Each submodule covers a group of endpoints. Handlers build a
//! [`Resource`] from their path parameters and hand it to [`serve`], which
//! resolves it to a single node call or to the name summary aggregator.

pub mod chain;
pub mod names;
pub mod node;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppError,
    resolve::{Resolution, Resource},
    summary::{NameSummaryAggregator, Outcome},
    upstream::{normalize, NodeApi},
};

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub node: Arc<dyn NodeApi>,
    pub summaries: NameSummaryAggregator,
}

impl AppState {
    pub fn new(node: Arc<dyn NodeApi>) -> Self {
        let summaries = NameSummaryAggregator::new(Arc::clone(&node));
        Self { node, summaries }
    }
}

/// Serve `resource` against the node.
pub(crate) async fn serve(state: &AppState, resource: Resource) -> Result<Response, AppError> {
    match resource.resolve()? {
        Resolution::Passthrough(route) => {
            let result = normalize(state.node.call(&route.call).await);
            let payload = AppError::from_passthrough(result, &route)?;
            let body = route
                .project(payload)
                .ok_or_else(|| AppError::NotFound(route.not_found.clone()))?;
            Ok(Json(body).into_response())
        }
        Resolution::Summary(name) => {
            let summary = state.summaries.summarize(&name).await;
            let status = match summary.outcome {
                Outcome::Complete | Outcome::NameInfoFailed => StatusCode::OK,
                Outcome::NameNotFound | Outcome::InfoMissing => StatusCode::NOT_FOUND,
            };
            Ok((status, Json(summary.record)).into_response())
        }
    }
}
