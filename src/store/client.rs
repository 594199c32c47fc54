use crate::plants::types::SearchQuery;
use crate::trace::context::RequestContext;

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain any answer from the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store transport failure: {0}")]
    Transport(String),
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
    #[error("store answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("store answered with a body that is not JSON: {0}")]
    Decode(String),
    #[error("invalid store url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Type alias for the boxed future every store operation resolves through.
/// Boxing keeps `DocumentStore` object safe so it can be shared as a trait object.
pub type StoreFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, StoreError>> + Send + 'a>>;

/// A document store that can run searches and deletes.
///
/// Implementations must be safe to call from many requests at once.
pub trait DocumentStore: Send + Sync {
    /// Short name used in log records.
    fn name(&self) -> &'static str;

    /// Runs `query` against its index and returns the raw search response.
    fn execute<'a>(&'a self, query: &'a SearchQuery) -> StoreFuture<'a>;

    /// Deletes the document `id` from `index` and returns the raw delete result.
    fn delete_by_id<'a>(
        &'a self,
        ctx: &'a RequestContext,
        index: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a>;
}
