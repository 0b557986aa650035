//! Route handlers.
//!
//! Bodies are read as raw bytes and decoded here so the malformed-JSON
//! policy stays in one place. Engine work runs on the blocking pool.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    Json,
};
use serde::de::DeserializeOwned;

use crate::engine::{EngineError, ParsedComponent};
use crate::http::batch::{canonical_expansions, check_batch_size, expand_batch, parse_batch};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::http::types::{BatchExpandResponse, BatchParseResponse, BatchQueryRequest, QueryRequest};
use crate::observability::metrics;

/// Raw request body whose read failures (such as the body limit) come back
/// as an [`ApiError`] JSON body.
pub struct RawBody(pub Bytes);

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Bytes::from_request(req, state).await?))
    }
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

/// `POST /expand`
pub async fn expand(
    State(state): State<AppState>,
    RawBody(body): RawBody,
) -> Result<Json<Vec<String>>, ApiError> {
    let request: QueryRequest = decode(&body, state.strict_json)?;
    let engine = state.engine.clone();
    let expansions = run_engine(move || engine.expand(&request.query)).await?;
    Ok(Json(canonical_expansions(expansions)))
}

/// `POST /parser`
pub async fn parse(
    State(state): State<AppState>,
    RawBody(body): RawBody,
) -> Result<Json<Vec<ParsedComponent>>, ApiError> {
    let request: QueryRequest = decode(&body, state.strict_json)?;
    let engine = state.engine.clone();
    let parsed = run_engine(move || engine.parse(&request.query)).await?;
    Ok(Json(parsed))
}

/// `POST /bulk/expand`
pub async fn bulk_expand(
    State(state): State<AppState>,
    RawBody(body): RawBody,
) -> Result<Json<BatchExpandResponse>, ApiError> {
    let request: BatchQueryRequest = decode(&body, state.strict_json)?;
    check_batch_size(request.queries.len(), state.max_batch_size)?;
    metrics::record_batch("expand", request.queries.len());

    let engine = state.engine.clone();
    let response = run_engine(move || expand_batch(engine.as_ref(), request.queries)).await?;
    Ok(Json(response))
}

/// `POST /bulk/parser`
pub async fn bulk_parse(
    State(state): State<AppState>,
    RawBody(body): RawBody,
) -> Result<Json<BatchParseResponse>, ApiError> {
    let request: BatchQueryRequest = decode(&body, state.strict_json)?;
    check_batch_size(request.queries.len(), state.max_batch_size)?;
    metrics::record_batch("parse", request.queries.len());

    let engine = state.engine.clone();
    let response = run_engine(move || parse_batch(engine.as_ref(), request.queries)).await?;
    Ok(Json(response))
}

/// Decode a JSON body.
///
/// Null or mistyped fields never fail here (see [`crate::http::types`]).
/// Only bodies that are not JSON, or not an object at the top level, do. In
/// permissive mode those are treated as the empty request.
fn decode<T>(body: &[u8], strict: bool) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(e) if strict => Err(ApiError::MalformedJson(e)),
        Err(e) => {
            tracing::debug!(error = %e, "Malformed JSON body, using empty request");
            Ok(T::default())
        }
    }
}

async fn run_engine<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, EngineError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}
