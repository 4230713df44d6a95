// ==========================================
// Roti Goolung Kitchen Core - Domain Types
// ==========================================
// Stage identifiers, per-stage writable fields,
// and the single quantity-clamping rule.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Stage - one processing step of a batch
// ==========================================
// Order matters: it is the order the batch moves through a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Dough,
    Rolling,
    Oven,
    Topping,
    Qc,
}

impl Stage {
    /// Stages that carry per-product row tables.
    pub const TABLE_STAGES: [Stage; 4] =
        [Stage::Dough, Stage::Rolling, Stage::Oven, Stage::Topping];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Dough => write!(f, "dough"),
            Stage::Rolling => write!(f, "rolling"),
            Stage::Oven => write!(f, "oven"),
            Stage::Topping => write!(f, "topping"),
            Stage::Qc => write!(f, "qc"),
        }
    }
}

// ==========================================
// Writable fields per stage row
// ==========================================
// `target` is deliberately absent everywhere: it is snapshotted at
// build time and has no write path.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoughField {
    Produced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollingField {
    StarterNeeded,
    StarterProduced,
    FillingNeeded,
    FillingProduced,
    RolledProduced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvenField {
    ToOven,
    OutOfOven,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToppingField {
    SfgTopping,
    FgTopping,
}

// ==========================================
// Quantity clamping
// ==========================================
// One rule for every quantity entering the system: floor to an
// integer, clamp to >= 0, anything unparseable becomes 0. Operators
// type into free-form inputs; bad input is corrected, never rejected.

/// Clamp a numeric value to a non-negative integer quantity.
pub fn clamp_quantity(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let floored = value.floor();
    if floored >= u32::MAX as f64 {
        u32::MAX
    } else {
        floored as u32
    }
}

/// Parse raw operator input into a quantity. Non-numeric input is 0.
pub fn parse_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(v) => clamp_quantity(v),
        Err(_) => 0,
    }
}

/// Quantity from an arbitrary JSON value (targets payloads arrive untyped).
pub fn quantity_from_json(value: Option<&serde_json::Value>) -> u32 {
    match value {
        Some(serde_json::Value::Number(n)) => clamp_quantity(n.as_f64().unwrap_or(0.0)),
        Some(serde_json::Value::String(s)) => parse_quantity(s),
        _ => 0,
    }
}
