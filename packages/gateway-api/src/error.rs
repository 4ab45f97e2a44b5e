//! Standard error response body.

use serde::{Deserialize, Serialize};

/// The JSON body returned for all error responses.
///
/// ```json
/// { "error": "Failed to get coin data", "status_code": 404 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable description of the problem.
    pub error: String,

    /// HTTP status the upstream node answered with, when the failure came
    /// from a non-200 node response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status_code: None,
        }
    }

    /// Attach the upstream status code.
    pub fn with_status(mut self, status_code: Option<u16>) -> Self {
        self.status_code = status_code;
        self
    }
}

/// Messages shared by the router and its clients.
pub mod messages {
    pub const ENDPOINT_NOT_FOUND: &str = "API endpoint not found";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_is_omitted_when_absent() {
        let e = ErrorResponse::new(messages::ENDPOINT_NOT_FOUND);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "API endpoint not found" }));
    }

    #[test]
    fn status_code_is_serialised_when_present() {
        let e = ErrorResponse::new("Failed to get coin data").with_status(Some(404));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["status_code"], 404);
    }
}
