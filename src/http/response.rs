//! Error responses.
//!
//! Every failure leaves the gateway as `{"error": "<message>"}` with the
//! status picked by [`ApiError::status`].

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::engine::EngineError;

/// Request-level failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The body could not be read, usually because it exceeds `MAX_BODY_BYTES`.
    #[error("{0}")]
    Body(#[from] BytesRejection),

    #[error("batch of {size} queries exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    #[error("address engine failed: {0}")]
    Engine(#[from] EngineError),

    #[error("server is shutting down")]
    ShuttingDown,

    #[error("engine task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Engine(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
