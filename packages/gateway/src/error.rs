//! Application-level error type returned by handlers.
//!
//! All variants serialise to [`ErrorResponse`] and map to an HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hsd_gateway_api::ErrorResponse;
use serde_json::Value;

use crate::resolve::{Route, ValidationError};
use crate::upstream::NodeResult;

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A path parameter was rejected before contacting the node.
    BadRequest(String),
    NotFound(String),
    /// The node reported a failure. `status` is the node's HTTP status, or
    /// `None` for an RPC `error` field.
    Upstream { status: Option<u16>, message: String },
    /// The node could not be reached or sent an unreadable response.
    Transport(String),
}

impl AppError {
    /// Unwrap a passthrough call's payload, or map its failure onto the
    /// outward error for `route`.
    pub fn from_passthrough(result: NodeResult, route: &Route) -> Result<Value, Self> {
        match result {
            NodeResult::Success(payload) => Ok(payload),
            NodeResult::NotFound => Err(AppError::NotFound(route.not_found.clone())),
            NodeResult::UpstreamError {
                status: Some(status),
                ..
            } => Err(AppError::Upstream {
                status: Some(status),
                message: route.failure.clone(),
            }),
            NodeResult::UpstreamError {
                status: None,
                message,
            } => Err(AppError::Upstream {
                status: None,
                message,
            }),
            NodeResult::TransportError(message) => Err(AppError::Transport(message)),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { status: None, .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream {
                status: Some(code), ..
            } => mirrored_status(*code),
            AppError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Reuse the node's status when it is an error status; otherwise 503.
fn mirrored_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::SERVICE_UNAVAILABLE)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Transport(msg) => {
                ErrorResponse::new(msg)
            }
            AppError::Upstream { status, message } => {
                ErrorResponse::new(message).with_status(status)
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::resolve::{Resolution, Resource};

    fn name_route() -> Route {
        match (Resource::Name {
            name: "woodburn".into(),
        })
        .resolve()
        {
            Ok(Resolution::Passthrough(route)) => route,
            other => panic!("expected passthrough, got {other:?}"),
        }
    }

    #[test]
    fn success_yields_payload() {
        assert_eq!(
            AppError::from_passthrough(NodeResult::Success(json!({ "a": 1 })), &name_route()),
            Ok(json!({ "a": 1 }))
        );
    }

    #[test]
    fn not_found_uses_resource_message() {
        let err = AppError::from_passthrough(NodeResult::NotFound, &name_route()).unwrap_err();
        assert_eq!(err, AppError::NotFound("Name not found".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_status_is_mirrored() {
        let err = AppError::from_passthrough(
            NodeResult::UpstreamError {
                status: Some(401),
                message: "status 401".into(),
            },
            &name_route(),
        )
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            err,
            AppError::Upstream {
                status: Some(401),
                message: "Failed to get name data".into()
            }
        );
    }

    #[test]
    fn non_error_upstream_status_becomes_503() {
        let err = AppError::Upstream {
            status: Some(302),
            message: "moved".into(),
        };
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn rpc_error_is_bad_request_with_node_message() {
        let err = AppError::from_passthrough(
            NodeResult::UpstreamError {
                status: None,
                message: "Invalid name.".into(),
            },
            &name_route(),
        )
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err,
            AppError::Upstream {
                status: None,
                message: "Invalid name.".into()
            }
        );
    }

    #[test]
    fn transport_error_is_500() {
        let err =
            AppError::from_passthrough(NodeResult::TransportError("timed out".into()), &name_route())
                .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_error_is_bad_request() {
        let err: AppError = ValidationError::InvalidDatatype("tx".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: AppError = ValidationError::InvalidSegment("..".into()).into();
        assert_eq!(err, AppError::BadRequest("invalid path segment \"..\"".into()));
    }
}
