// ==========================================
// Roti Goolung Kitchen Core - Production State
// ==========================================
// The flat aggregate behind the standalone Kitchen Production page.
// Historically grew in parallel to KitchenState over the same
// targets payload; the two are never reconciled (see DESIGN.md).
// ==========================================

use crate::domain::targets::TargetsPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductionState {
    /// location -> product -> produced quantity
    pub production: HashMap<String, HashMap<String, u32>>,
    pub completed_locations: HashMap<String, bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductionState {
    /// Zero-fill the location x product grid from a targets payload.
    pub fn build_from_targets(payload: &TargetsPayload) -> Self {
        let mut production: HashMap<String, HashMap<String, u32>> = HashMap::new();
        let mut completed = HashMap::new();
        for location in payload.locations() {
            let cells = payload
                .products
                .iter()
                .map(|p| (p.product_name.clone(), 0))
                .collect();
            production.insert(location.clone(), cells);
            completed.insert(location, false);
        }
        ProductionState {
            production,
            completed_locations: completed,
            updated_at: Some(Utc::now()),
        }
    }

    /// Whether this snapshot still covers the payload's location x
    /// product grid. Used by the strict-targets-match option to decide
    /// if a saved snapshot is stale.
    pub fn matches_targets(&self, payload: &TargetsPayload) -> bool {
        let locations = payload.locations();
        if self.production.len() != locations.len() {
            return false;
        }
        locations.iter().all(|loc| {
            self.production.get(loc).is_some_and(|cells| {
                cells.len() == payload.products.len()
                    && payload
                        .products
                        .iter()
                        .all(|p| cells.contains_key(&p.product_name))
            })
        })
    }

    pub fn produced(&self, location: &str, product_name: &str) -> u32 {
        self.production
            .get(location)
            .and_then(|cells| cells.get(product_name))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_complete(&self, location: &str) -> bool {
        self.completed_locations.get(location).copied().unwrap_or(false)
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
