// ==========================================
// Roti Goolung Kitchen Core - API Errors
// ==========================================
// Errors here are for explicit user actions that failed (saves) or
// programmer errors (unknown location names). Expected workflow
// conditions - no active location, an untouched stage, a product
// missing from one table - are plain data, never errors.
// ==========================================

use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KitchenError {
    /// An explicit save could not be persisted. The in-memory state
    /// is untouched; the UI should alert and let the operator retry.
    #[error("snapshot store failure: {0}")]
    Store(#[from] StoreError),

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Serialization failures on the save path count as store failures.
impl From<serde_json::Error> for KitchenError {
    fn from(err: serde_json::Error) -> Self {
        KitchenError::Store(StoreError::Serialization(err))
    }
}

/// Result type alias.
pub type KitchenResult<T> = Result<T, KitchenError>;
