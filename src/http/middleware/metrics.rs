//! Per-route request metrics.
//!
//! Installed with `route_layer`, so the matched route template is available
//! and unknown paths never create new label values.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = request.method().clone();

    let response = next.run(request).await;

    metrics::record_request(method.as_str(), &route, response.status().as_u16(), start);
    response
}
