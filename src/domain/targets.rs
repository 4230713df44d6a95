// ==========================================
// Roti Goolung Kitchen Core - Targets Payload
// ==========================================
// The external input produced by the marketing planning screen.
// Wire format is camelCase JSON; every field is defaulted so a
// partial or sloppy payload still parses into a usable value.
// This module is the one safe-parse boundary of the system.
// ==========================================

use crate::domain::types::quantity_from_json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ==========================================
// TargetsMeta - free-form batch metadata
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetsMeta {
    pub target_date: Option<String>, // planned production date (free-form)
    pub note: Option<String>,        // planner note
    pub status: Option<String>,      // batch status label
}

// ==========================================
// TargetProduct - one planned product
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetProduct {
    pub product_name: String,     // unique key, joins rows across stages
    pub totals: Map<String, Value>, // location -> planned quantity
    pub grand_total: Option<Value>, // planner-supplied sum, display only
    pub sku: Option<String>,        // display metadata, not copied to rows
    pub category: Option<String>,   // display metadata
    pub unit_weight: Option<f64>,   // grams per piece, display metadata
}

impl TargetProduct {
    /// Planned quantity for one location, with the global clamp rule
    /// applied. Missing or non-numeric entries count as 0.
    pub fn target_for(&self, location: &str) -> u32 {
        quantity_from_json(self.totals.get(location))
    }
}

// ==========================================
// TargetsPayload - the full planning payload
// ==========================================
// `summary_per_location` is the canonical location list; its key
// insertion order (serde_json preserve_order) is the location order
// for the whole batch. `materials` is opaque to the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetsPayload {
    pub meta: TargetsMeta,
    pub products: Vec<TargetProduct>,
    pub summary_per_location: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<Value>,
    /// Annotated by QC completion; absent until the first location
    /// finishes its run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qc_completed_at: Option<String>,
}

impl TargetsPayload {
    /// Location names in payload order. This is captured once into
    /// `KitchenState::locations` at build time and never re-derived.
    pub fn locations(&self) -> Vec<String> {
        self.summary_per_location.keys().cloned().collect()
    }

    /// Display metadata lookup by product name.
    pub fn product(&self, product_name: &str) -> Option<&TargetProduct> {
        self.products.iter().find(|p| p.product_name == product_name)
    }

    /// Parse a raw JSON snapshot. Returns `None` on structurally
    /// invalid JSON; missing fields fall back to defaults instead.
    pub fn from_value(value: Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(payload) => Some(payload),
            Err(err) => {
                tracing::warn!(error = %err, "targets payload failed to parse, treating as absent");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_parses_to_default() {
        let payload = TargetsPayload::from_value(json!({})).unwrap();
        assert!(payload.products.is_empty());
        assert!(payload.locations().is_empty());
        assert_eq!(payload.meta, TargetsMeta::default());
    }

    #[test]
    fn test_locations_preserve_payload_order() {
        let payload = TargetsPayload::from_value(json!({
            "summaryPerLocation": { "Zebra": 3, "Alpha": 5, "Mid": 1 }
        }))
        .unwrap();
        assert_eq!(payload.locations(), vec!["Zebra", "Alpha", "Mid"]);
    }

    #[test]
    fn test_target_for_applies_clamp_rule() {
        let payload = TargetsPayload::from_value(json!({
            "products": [{
                "productName": "Bun",
                "totals": { "A": 10, "B": "7", "C": -4, "D": 2.9 }
            }]
        }))
        .unwrap();
        let bun = payload.product("Bun").unwrap();
        assert_eq!(bun.target_for("A"), 10);
        assert_eq!(bun.target_for("B"), 7);
        assert_eq!(bun.target_for("C"), 0);
        assert_eq!(bun.target_for("D"), 2);
        assert_eq!(bun.target_for("missing"), 0);
    }

    #[test]
    fn test_non_object_payload_is_absent() {
        assert!(TargetsPayload::from_value(json!("oops")).is_none());
        assert!(TargetsPayload::from_value(json!(42)).is_none());
    }

    #[test]
    fn test_camel_case_round_trip() {
        let payload = TargetsPayload::from_value(json!({
            "meta": { "targetDate": "2026-08-30", "note": "ramadan push", "status": "final" },
            "products": [{ "productName": "Bun", "totals": { "A": 10 }, "grandTotal": 10 }],
            "summaryPerLocation": { "A": 10 }
        }))
        .unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["meta"]["targetDate"], "2026-08-30");
        assert_eq!(value["products"][0]["productName"], "Bun");
        assert!(value["summaryPerLocation"].is_object());
        // qcCompletedAt is absent until QC writes it
        assert!(value.get("qcCompletedAt").is_none());
    }
}
