use super::error::PlantError;
use super::interpreter::{interpret_delete, interpret_search};
use super::types::{DeleteOutcome, SearchOutcome, SearchQuery};
use crate::store::client::{DocumentStore, StoreError};
use crate::trace::context::RequestContext;

use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Search and delete operations over a shared document store.
///
/// Holds no mutable state, one instance serves every concurrent request.
pub struct PlantService {
    store: Arc<dyn DocumentStore>,
    index: String,
    store_timeout: Duration,
}

impl PlantService {
    pub fn new(store: Arc<dyn DocumentStore>, index: &str, store_timeout: Duration) -> Self {
        Self {
            store,
            index: index.to_string(),
            store_timeout,
        }
    }

    /// The index plants live in.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Runs `query` with a single store call and interprets the answer.
    pub async fn search(&self, query: SearchQuery) -> Result<SearchOutcome, PlantError> {
        let span = query.context().span().clone();
        self.run_search(&query).instrument(span).await
    }

    /// Deletes plant `id` from the plants index. The id is used exactly as given;
    /// only blank ids are rejected.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<DeleteOutcome, PlantError> {
        if id.trim().is_empty() {
            return Err(PlantError::InvalidId);
        }
        self.run_delete(ctx, id).instrument(ctx.span().clone()).await
    }

    async fn run_search(&self, query: &SearchQuery) -> Result<SearchOutcome, PlantError> {
        let raw = match self.with_deadline(self.store.execute(query)).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(store = self.store.name(), error = %e, "Error querying database");
                return Err(e.into());
            }
        };
        tracing::debug!(store = self.store.name(), result = %raw, "Raw query result");

        let outcome = interpret_search(&raw);
        match &outcome {
            Ok(found) => tracing::info!(
                index = query.index_name(),
                hit_count = found.hit_count(),
                plants = ?found.plant_ids(),
                "Query Result"
            ),
            Err(e) => tracing::error!(index = query.index_name(), error = %e, "Query Result"),
        }
        outcome
    }

    async fn run_delete(&self, ctx: &RequestContext, id: &str) -> Result<DeleteOutcome, PlantError> {
        let raw = match self
            .with_deadline(self.store.delete_by_id(ctx, &self.index, id))
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(store = self.store.name(), id, error = %e, "Error deleting a plant");
                return Err(e.into());
            }
        };

        let outcome = interpret_delete(id, &raw);
        match &outcome {
            Ok(_) => tracing::info!(index = %self.index, id, result = %raw, "Delete Query Result"),
            Err(PlantError::NotFound { .. }) => {
                tracing::info!(index = %self.index, id, "Plant to delete does not exist")
            }
            Err(e) => tracing::error!(index = %self.index, id, error = %e, "Delete Query Result"),
        }
        outcome
    }

    /// Bounds a store call by the store timeout. The call is dropped, and with
    /// it any in-flight request, once the deadline passes.
    async fn with_deadline<F>(&self, call: F) -> Result<Value, StoreError>
    where
        F: Future<Output = Result<Value, StoreError>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.store_timeout)),
        }
    }
}
