// ==========================================
// Roti Goolung Kitchen Core - Domain Layer
// ==========================================

pub mod kitchen;
pub mod production;
pub mod targets;
pub mod types;

pub use kitchen::{DoughRow, KitchenState, OvenRow, RollingRow, ToppingRow};
pub use production::ProductionState;
pub use targets::{TargetProduct, TargetsMeta, TargetsPayload};
pub use types::{
    clamp_quantity, parse_quantity, quantity_from_json, DoughField, OvenField, RollingField,
    Stage, ToppingField,
};
