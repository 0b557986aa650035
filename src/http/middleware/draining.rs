//! Rejects requests once shutdown has started.
//!
//! Connections already open may still send requests while the server drains;
//! those get `503` instead of new engine work.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::response::ApiError;
use crate::lifecycle::Lifecycle;

pub async fn reject_while_draining(
    State(lifecycle): State<Lifecycle>,
    request: Request,
    next: Next,
) -> Response {
    if lifecycle.is_shutting_down() {
        return ApiError::ShuttingDown.into_response();
    }
    next.run(request).await
}
