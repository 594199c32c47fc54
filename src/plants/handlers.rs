use super::error::PlantError;
use super::query;
use super::service::PlantService;
use super::types::{DeleteOutcome, SearchOutcome};
use crate::trace::context::RequestContext;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use std::sync::Arc;

pub async fn handle_search_plants(
    Extension(service): Extension<Arc<PlantService>>,
    ctx: RequestContext,
) -> (StatusCode, String) {
    let query = query::match_all(service.index(), ctx);
    search_response(service.search(query).await)
}

pub async fn handle_delete_plant(
    Extension(service): Extension<Arc<PlantService>>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> (StatusCode, String) {
    let result = service.delete(&ctx, &id).await;
    delete_response(&id, result)
}

/// Maps a search result to exactly one status and body. Failures are already
/// logged by `PlantService`.
pub fn search_response(result: Result<SearchOutcome, PlantError>) -> (StatusCode, String) {
    match result {
        Ok(outcome) if outcome.is_empty() => (
            StatusCode::NO_CONTENT,
            "There are no plants in the primary storage".to_string(),
        ),
        Ok(outcome) => (
            StatusCode::OK,
            format!(
                "YAY! There are {} plants in the primary storage",
                outcome.hit_count()
            ),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error querying the primary storage".to_string(),
        ),
    }
}

/// Maps a delete result to exactly one status and body.
pub fn delete_response(id: &str, result: Result<DeleteOutcome, PlantError>) -> (StatusCode, String) {
    match result {
        Ok(_) => (
            StatusCode::OK,
            format!("Plant {} was deleted from the primary storage", id),
        ),
        Err(PlantError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            format!("Plant {} does not exist in the primary storage", id),
        ),
        Err(PlantError::InvalidId) => (
            StatusCode::BAD_REQUEST,
            "A plant id is required".to_string(),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error deleting a plant from the primary storage".to_string(),
        ),
    }
}
