// ==========================================
// Roti Goolung Kitchen Core - Kitchen State
// ==========================================
// The owned aggregate for one production batch: four per-location
// stage tables derived once from a targets payload, mutated in
// place by the stage controllers, persisted on demand.
// ==========================================

use crate::domain::targets::TargetsPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Per-stage row shapes
// ==========================================
// product_name is the cross-stage join key: unique within a
// location and identical across all four tables. Rows are created
// once at build time and only mutated afterwards.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoughRow {
    pub product_name: String,
    pub target: u32, // snapshot of totals[location], immutable after build
    pub produced: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RollingRow {
    pub product_name: String,
    pub target: u32, // same snapshot as the dough row
    pub starter_needed: u32,
    pub starter_produced: u32,
    pub filling_needed: u32,
    pub filling_produced: u32,
    pub rolled_produced: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OvenRow {
    pub product_name: String,
    pub to_oven: u32,
    pub out_of_oven: u32,
    pub reject: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToppingRow {
    pub product_name: String,
    pub sfg_topping: u32,
    pub fg_topping: u32,
}

// ==========================================
// KitchenState - the whole-batch aggregate
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KitchenState {
    /// The payload this state was derived from. Kept nested so the
    /// persisted state snapshot is self-sufficient for a full restore.
    pub targets: Option<TargetsPayload>,
    /// Location order, fixed at build time from the payload's
    /// summaryPerLocation key order. The ordering authority.
    pub locations: Vec<String>,
    pub active_location: Option<String>,
    pub dough: HashMap<String, Vec<DoughRow>>,
    pub rolling: HashMap<String, Vec<RollingRow>>,
    pub oven: HashMap<String, Vec<OvenRow>>,
    pub topping: HashMap<String, Vec<ToppingRow>>,
    /// Monotonic per-location completion flags, set only by QC.
    pub completed_locations: HashMap<String, bool>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl KitchenState {
    /// Derive a fresh state from a targets payload. Pure: the payload
    /// is the only input besides the clock.
    ///
    /// For each location (payload key order) and each product (array
    /// order), one row per stage table is created. Dough and rolling
    /// rows snapshot `totals[location]` as their immutable target; all
    /// other quantities start at 0.
    pub fn build_from_targets(payload: Option<&TargetsPayload>) -> Self {
        let payload = match payload {
            Some(p) => p,
            None => return Self::default(),
        };

        let locations = payload.locations();
        let mut state = KitchenState {
            targets: Some(payload.clone()),
            active_location: locations.first().cloned(),
            locations: locations.clone(),
            last_updated_at: Some(Utc::now()),
            ..Default::default()
        };

        for location in &locations {
            let mut dough = Vec::with_capacity(payload.products.len());
            let mut rolling = Vec::with_capacity(payload.products.len());
            let mut oven = Vec::with_capacity(payload.products.len());
            let mut topping = Vec::with_capacity(payload.products.len());

            for product in &payload.products {
                let target = product.target_for(location);
                dough.push(DoughRow {
                    product_name: product.product_name.clone(),
                    target,
                    ..Default::default()
                });
                rolling.push(RollingRow {
                    product_name: product.product_name.clone(),
                    target,
                    ..Default::default()
                });
                oven.push(OvenRow {
                    product_name: product.product_name.clone(),
                    ..Default::default()
                });
                topping.push(ToppingRow {
                    product_name: product.product_name.clone(),
                    ..Default::default()
                });
            }

            state.dough.insert(location.clone(), dough);
            state.rolling.insert(location.clone(), rolling);
            state.oven.insert(location.clone(), oven);
            state.topping.insert(location.clone(), topping);
            state.completed_locations.insert(location.clone(), false);
        }

        state
    }

    /// Whether QC has closed out this location.
    pub fn is_complete(&self, location: &str) -> bool {
        self.completed_locations.get(location).copied().unwrap_or(false)
    }

    pub fn has_location(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }

    /// Dough produced for one product at one location; 0 when either
    /// is unknown. Rolling reads this as its derived reference column.
    pub fn dough_produced(&self, location: &str, product_name: &str) -> u32 {
        self.dough
            .get(location)
            .and_then(|rows| rows.iter().find(|r| r.product_name == product_name))
            .map(|r| r.produced)
            .unwrap_or(0)
    }

    /// Refresh the mutation timestamp. Every write path ends here.
    pub fn touch(&mut self) {
        self.last_updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> TargetsPayload {
        TargetsPayload::from_value(json!({
            "summaryPerLocation": { "A": 10, "B": 5 },
            "products": [
                { "productName": "Bun", "totals": { "A": 10, "B": 5 } },
                { "productName": "Roll", "totals": { "A": 4 } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_build_from_none_is_default() {
        let state = KitchenState::build_from_targets(None);
        assert_eq!(state, KitchenState::default());
        assert!(state.locations.is_empty());
        assert!(state.active_location.is_none());
        assert!(state.last_updated_at.is_none());
    }

    #[test]
    fn test_build_shape_invariant() {
        let state = KitchenState::build_from_targets(Some(&payload()));
        assert_eq!(state.locations, vec!["A", "B"]);
        assert_eq!(state.active_location.as_deref(), Some("A"));
        for loc in &state.locations {
            assert_eq!(state.dough[loc].len(), 2);
            assert_eq!(state.rolling[loc].len(), 2);
            assert_eq!(state.oven[loc].len(), 2);
            assert_eq!(state.topping[loc].len(), 2);
            assert!(!state.is_complete(loc));
        }
    }

    #[test]
    fn test_build_snapshots_targets() {
        let state = KitchenState::build_from_targets(Some(&payload()));
        assert_eq!(state.dough["A"][0].target, 10);
        assert_eq!(state.dough["B"][0].target, 5);
        assert_eq!(state.rolling["A"][1].target, 4);
        // Roll has no B total
        assert_eq!(state.dough["B"][1].target, 0);
        assert_eq!(state.dough["A"][0].produced, 0);
    }

    #[test]
    fn test_dough_produced_lookup() {
        let mut state = KitchenState::build_from_targets(Some(&payload()));
        state.dough.get_mut("A").unwrap()[0].produced = 12;
        assert_eq!(state.dough_produced("A", "Bun"), 12);
        assert_eq!(state.dough_produced("A", "Croissant"), 0);
        assert_eq!(state.dough_produced("Nowhere", "Bun"), 0);
    }

    #[test]
    fn test_state_serde_round_trip() {
        let mut state = KitchenState::build_from_targets(Some(&payload()));
        state.dough.get_mut("A").unwrap()[0].produced = 3;
        let raw = serde_json::to_string(&state).unwrap();
        let back: KitchenState = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, state);
    }
}
