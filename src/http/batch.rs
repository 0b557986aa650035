//! Batch assembly.
//!
//! Pure functions over an engine; the handlers run them on a blocking thread.
//! Items come back in input order, each carrying its original `query_id`.
//! The first engine failure aborts the whole batch.

use crate::engine::{AddressEngine, EngineError};
use crate::http::response::ApiError;
use crate::http::types::{
    BatchExpandItem, BatchExpandResponse, BatchParseItem, BatchParseResponse, BatchQuery,
};

/// Sort and dedupe so identical requests give identical bytes.
pub fn canonical_expansions(mut expansions: Vec<String>) -> Vec<String> {
    expansions.sort_unstable();
    expansions.dedup();
    expansions
}

/// Reject a batch above the configured cap.
pub fn check_batch_size(size: usize, limit: Option<usize>) -> Result<(), ApiError> {
    match limit {
        Some(limit) if size > limit => Err(ApiError::BatchTooLarge { size, limit }),
        _ => Ok(()),
    }
}

pub fn expand_batch(
    engine: &dyn AddressEngine,
    queries: Vec<BatchQuery>,
) -> Result<BatchExpandResponse, EngineError> {
    let items = queries
        .into_iter()
        .map(|q| {
            let expansions = canonical_expansions(engine.expand(&q.query)?);
            Ok(BatchExpandItem {
                query_id: q.query_id,
                expansions,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    Ok(BatchExpandResponse { items })
}

pub fn parse_batch(
    engine: &dyn AddressEngine,
    queries: Vec<BatchQuery>,
) -> Result<BatchParseResponse, EngineError> {
    let items = queries
        .into_iter()
        .map(|q| {
            Ok(BatchParseItem {
                parsed: engine.parse(&q.query)?,
                query_id: q.query_id,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    Ok(BatchParseResponse { items })
}
