// ==========================================
// Roti Goolung Kitchen Core - Snapshot Store
// ==========================================
// Session-scoped key-value persistence port. A batch lives and dies
// with one shift; snapshots are not a durable system of record.
// ==========================================

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use serde_json::Value;

/// Raw targets payload snapshot, written by the planning screen.
pub const TARGETS_KEY: &str = "lastKitchenTargets";
/// Full kitchen state snapshot; self-sufficient for restore.
pub const KITCHEN_STATE_KEY: &str = "lastKitchenState_v1";
/// Snapshot of the standalone production page's aggregate.
pub const PRODUCTION_STATE_KEY: &str = "lastKitchenProduction_v1";

/// Session-scoped key-value store for JSON snapshots.
///
/// Load is fail-open: malformed JSON or a broken backing store yields
/// `None` plus a warning log, and the caller falls back to its default
/// aggregate. Save failures propagate so an explicit user save can be
/// answered with an alert. Remove is best-effort.
pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&self, key: &str, value: &Value) -> StoreResult<()>;
    fn remove(&self, key: &str);
}
