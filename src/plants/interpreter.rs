//! Reads raw store JSON into outcomes.
//!
//! The expected shapes are mirrored by small `serde` structs; anything that does
//! not fit them becomes `PlantError::MalformedResponse` instead of a panic.

use super::error::PlantError;
use super::types::{DeleteOutcome, SearchOutcome};

use serde::Deserialize;
use serde_json::Value;

/// Where the hit list lives in a search response.
pub const HITS_PATH: &str = "hits.hits";
/// Where the outcome of a delete lives in a delete response.
pub const RESULT_PATH: &str = "result";

const INDEX_NOT_FOUND: &str = "index_not_found_exception";

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    hits: Option<RawHits>,
}

#[derive(Debug, Deserialize)]
struct RawHits {
    hits: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawDeleteResult {
    result: Option<String>,
    found: Option<bool>,
}

/// Extracts the hits of a search response.
///
/// A store-side error in the body is reported as `StoreRejected`, a body without
/// an array at `hits.hits` as `MalformedResponse`.
pub fn interpret_search(raw: &Value) -> Result<SearchOutcome, PlantError> {
    if let Some(err) = store_rejection(raw) {
        return Err(err);
    }

    let parsed =
        RawSearchResponse::deserialize(raw).map_err(|e| PlantError::malformed(HITS_PATH, e))?;

    match parsed.hits {
        Some(hits) => Ok(SearchOutcome::from_hits(hits.hits)),
        None => Err(PlantError::malformed(HITS_PATH, "missing field `hits`")),
    }
}

/// Classifies a delete result for document `id`.
///
/// A missing document, or a missing index, is `NotFound`.
pub fn interpret_delete(id: &str, raw: &Value) -> Result<DeleteOutcome, PlantError> {
    let not_found = || PlantError::NotFound { id: id.to_string() };

    if let Some(err) = store_rejection(raw) {
        return match err {
            PlantError::StoreRejected { ref kind, .. } if kind == INDEX_NOT_FOUND => Err(not_found()),
            err => Err(err),
        };
    }

    let parsed =
        RawDeleteResult::deserialize(raw).map_err(|e| PlantError::malformed(RESULT_PATH, e))?;

    match (parsed.result.as_deref(), parsed.found) {
        (Some("deleted"), _) => Ok(DeleteOutcome {
            success: true,
            detail: raw.clone(),
        }),
        (Some("not_found"), _) | (_, Some(false)) => Err(not_found()),
        (Some(other), _) => Err(PlantError::malformed(
            RESULT_PATH,
            format!("unexpected result `{}`", other),
        )),
        (None, _) => Err(PlantError::malformed(RESULT_PATH, "missing field `result`")),
    }
}

/// Reads a top-level `error` member, in either its object or string form.
fn store_rejection(raw: &Value) -> Option<PlantError> {
    let error = raw.get("error")?;

    let (kind, reason) = match error {
        Value::Null => return None,
        Value::Object(fields) => (
            fields
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            fields
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        ),
        Value::String(message) => ("error".to_string(), message.clone()),
        other => ("error".to_string(), other.to_string()),
    };

    Some(PlantError::StoreRejected { kind, reason })
}
