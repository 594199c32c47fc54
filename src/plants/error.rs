use crate::store::client::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlantError {
    /// The store could not be reached or did not answer in time.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The store answered, but not with the shape we read.
    #[error("malformed store response: expected `{path}` ({reason})")]
    MalformedResponse { path: &'static str, reason: String },
    /// The store answered with an error of its own, e.g. a missing index.
    #[error("store rejected the request: {kind}: {reason}")]
    StoreRejected { kind: String, reason: String },
    #[error("plant {id} not found")]
    NotFound { id: String },
    #[error("plant id must not be empty")]
    InvalidId,
}

impl PlantError {
    pub(crate) fn malformed(path: &'static str, reason: impl ToString) -> Self {
        PlantError::MalformedResponse {
            path,
            reason: reason.to_string(),
        }
    }
}
