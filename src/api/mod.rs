// ==========================================
// Roti Goolung Kitchen Core - API Layer
// ==========================================
// Controllers consumed by the stage screens and the standalone
// production page.
// ==========================================

pub mod error;
pub mod kitchen_api;
pub mod production_api;

pub use error::{KitchenError, KitchenResult};
pub use kitchen_api::{JoinedDoughRow, JoinedRollingRow, KitchenApi, QcSummaryRow};
pub use production_api::{ProductionApi, Shortfall};
