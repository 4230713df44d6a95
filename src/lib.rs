// ==========================================
// Roti Goolung Kitchen Core
// ==========================================
// In-session state machine for one bakery production batch: targets
// in, per-location stage tables (dough / rolling / oven / topping),
// QC reconciliation, plus the flat production tracker. Persistence
// is a session-scoped snapshot store - one shift, one browser-like
// session, no durable backend.
// ==========================================

// Domain layer - aggregates and types
pub mod domain;

// Snapshot store - session-scoped persistence port
pub mod store;

// API layer - workflow controllers
pub mod api;

// Configuration
pub mod config;

// Logging
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

pub use api::{
    JoinedDoughRow, JoinedRollingRow, KitchenApi, KitchenError, KitchenResult, ProductionApi,
    QcSummaryRow, Shortfall,
};
pub use config::KitchenConfig;
pub use domain::{
    DoughField, DoughRow, KitchenState, OvenField, OvenRow, ProductionState, RollingField,
    RollingRow, Stage, TargetProduct, TargetsMeta, TargetsPayload, ToppingField, ToppingRow,
};
pub use store::{
    FileStore, MemoryStore, SessionStore, StoreError, StoreResult, KITCHEN_STATE_KEY,
    PRODUCTION_STATE_KEY, TARGETS_KEY,
};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Roti Goolung Kitchen";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
