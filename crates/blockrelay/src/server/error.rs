use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use blockrelay_core::{CoreError, ErrorKind};

// ==============================================================================
// Error Type
// ==============================================================================

#[derive(Debug)]
pub(crate) enum AppError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Everything that went wrong talking to the node is an upstream failure,
/// except an unknown block, which the caller asked for.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::Config => Self::Internal(err.to_string()),
            ErrorKind::Transport
            | ErrorKind::Protocol
            | ErrorKind::Remote
            | ErrorKind::Decode
            | ErrorKind::Format => {
                tracing::warn!(error = %err, "upstream node call failed");
                Self::BadGateway(err.to_string())
            }
        }
    }
}
