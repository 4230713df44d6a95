// ==========================================
// Roti Goolung Kitchen Core - Store Errors
// ==========================================
// Tool: thiserror derive macro
// ==========================================

use thiserror::Error;

/// Snapshot store error type.
///
/// Only the save path surfaces these; loads are fail-open and report
/// nothing beyond a warning log (a corrupt snapshot must never crash
/// a stage screen).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot write failed for key={key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias.
pub type StoreResult<T> = Result<T, StoreError>;
