use super::handlers::{handle_delete_plant, handle_search_plants};
use super::service::PlantService;
use crate::trace::middleware::attach_request_context;

use axum::extract::Extension;
use axum::middleware;
use axum::routing::{delete, get};
use axum::Router;
use std::sync::Arc;

/// Collection route: search every plant.
pub const ROUTE_PLANTS: &str = "/plants";
/// Single plant route, keyed by plant id.
pub const ROUTE_PLANT: &str = "/plants/:id";

pub fn router(service: Arc<PlantService>) -> Router {
    Router::new()
        .route(ROUTE_PLANTS, get(handle_search_plants))
        .route(ROUTE_PLANT, delete(handle_delete_plant))
        .layer(Extension(service))
        .layer(middleware::from_fn(attach_request_context))
}
