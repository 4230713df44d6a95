// ==========================================
// Roti Goolung Kitchen Core - Kitchen API
// ==========================================
// Owns the KitchenState aggregate for the stage screens (Dough,
// Rolling, Oven, Topping, QC). All mutation funnels through here;
// persistence happens only on explicit actions.
// ==========================================

use std::sync::Arc;

use crate::api::error::{KitchenError, KitchenResult};
use crate::domain::kitchen::KitchenState;
use crate::domain::targets::TargetsPayload;
use crate::store::{SessionStore, KITCHEN_STATE_KEY, TARGETS_KEY};

mod qc;
mod stages;

pub use qc::QcSummaryRow;
pub use stages::{JoinedDoughRow, JoinedRollingRow};

// ==========================================
// KitchenApi
// ==========================================

/// Kitchen workflow controller.
///
/// One instance per session. Construction runs the snapshot
/// precedence rule; afterwards every stage screen reads and writes
/// through the same instance.
pub struct KitchenApi {
    store: Arc<dyn SessionStore>,
    state: KitchenState,
}

impl KitchenApi {
    /// Restore from the session store.
    ///
    /// Precedence: a full kitchen-state snapshot wins over a raw
    /// targets snapshot, so a prior shift's progress is never
    /// discarded because a stale targets payload is still around.
    /// With neither present the state starts empty.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let state = match store.load(KITCHEN_STATE_KEY) {
            Some(raw) => match serde_json::from_value::<KitchenState>(raw) {
                Ok(state) => {
                    tracing::debug!("restored kitchen state snapshot");
                    state
                }
                Err(err) => {
                    tracing::warn!(error = %err, "kitchen state snapshot unreadable, falling back to targets");
                    Self::state_from_targets_snapshot(store.as_ref())
                }
            },
            None => Self::state_from_targets_snapshot(store.as_ref()),
        };
        KitchenApi { store, state }
    }

    fn state_from_targets_snapshot(store: &dyn SessionStore) -> KitchenState {
        let payload = store.load(TARGETS_KEY).and_then(TargetsPayload::from_value);
        KitchenState::build_from_targets(payload.as_ref())
    }

    pub fn state(&self) -> &KitchenState {
        &self.state
    }

    pub fn active_location(&self) -> Option<&str> {
        self.state.active_location.as_deref()
    }

    /// Generic state transition. The only write path into the
    /// aggregate; refreshes the mutation timestamp.
    pub fn mutate(&mut self, updater: impl FnOnce(&mut KitchenState)) {
        updater(&mut self.state);
        self.state.touch();
    }

    /// Switch the stage screens to another location tab.
    pub fn set_active_location(&mut self, location: &str) -> KitchenResult<()> {
        if !self.state.has_location(location) {
            return Err(KitchenError::UnknownLocation(location.to_string()));
        }
        self.state.active_location = Some(location.to_string());
        Ok(())
    }

    /// Install a new targets payload, or clear everything with `None`.
    ///
    /// Non-null rebuilds the state from scratch and persists both
    /// snapshots; any produced quantities accumulated so far are
    /// discarded. Null clears the in-memory state and removes both
    /// snapshot keys.
    pub fn set_targets(&mut self, payload: Option<TargetsPayload>) -> KitchenResult<()> {
        match payload {
            None => {
                self.store.remove(TARGETS_KEY);
                self.store.remove(KITCHEN_STATE_KEY);
                self.state = KitchenState::default();
                tracing::info!("targets cleared, kitchen state reset");
                Ok(())
            }
            Some(payload) => {
                let state = KitchenState::build_from_targets(Some(&payload));
                self.store
                    .save(TARGETS_KEY, &serde_json::to_value(&payload)?)?;
                self.store
                    .save(KITCHEN_STATE_KEY, &serde_json::to_value(&state)?)?;
                tracing::info!(
                    locations = state.locations.len(),
                    products = payload.products.len(),
                    "targets installed, kitchen state rebuilt"
                );
                self.state = state;
                Ok(())
            }
        }
    }

    /// Explicit save. Refreshes the timestamp and persists the whole
    /// state; when targets are loaded they are re-persisted too so the
    /// two snapshots stay mutually consistent. On failure the error
    /// surfaces to the caller and the in-memory state stays usable.
    pub fn save(&mut self) -> KitchenResult<()> {
        self.state.touch();
        self.store
            .save(KITCHEN_STATE_KEY, &serde_json::to_value(&self.state)?)?;
        if let Some(targets) = &self.state.targets {
            self.store.save(TARGETS_KEY, &serde_json::to_value(targets)?)?;
        }
        tracing::debug!("kitchen state saved");
        Ok(())
    }

    /// Clear both snapshot keys and return to the empty state.
    /// Idempotent.
    pub fn reset(&mut self) {
        self.store.remove(TARGETS_KEY);
        self.store.remove(KITCHEN_STATE_KEY);
        self.state = KitchenState::default();
        tracing::info!("kitchen state reset");
    }
}
