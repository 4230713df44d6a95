use super::*;

use chrono::Utc;
use serde::Serialize;

// ==========================================
// QC / team-lead reconciliation
// ==========================================
// The QC screen folds all four stage tables into one per-product
// summary and owns the only path that marks a location complete.

/// One summary line across all stages for one product.
///
/// A product shows up here as soon as it exists in any one stage
/// table; cells for tables it is missing from stay `None` and render
/// as "-". Nothing here is stored - the fold runs on every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QcSummaryRow {
    pub product_name: String,
    pub target: Option<u32>,
    pub dough_produced: Option<u32>,
    pub starter_produced: Option<u32>,
    pub filling_produced: Option<u32>,
    pub rolled_produced: Option<u32>,
    pub to_oven: Option<u32>,
    pub out_of_oven: Option<u32>,
    pub reject: Option<u32>,
    pub sfg: Option<u32>,
    pub fg: Option<u32>,
}

impl QcSummaryRow {
    /// Display form of one cell: "-" for a stage the product never
    /// reached.
    pub fn cell(value: Option<u32>) -> String {
        match value {
            Some(n) => n.to_string(),
            None => "-".to_string(),
        }
    }
}

impl KitchenApi {
    /// Cross-stage summary for the active location, or `None` when no
    /// location is available.
    ///
    /// Built as a left-fold over the four stage lists keyed by product
    /// name, in first-appearance order (dough first, then anything
    /// only present downstream).
    pub fn qc_summary(&self) -> Option<Vec<QcSummaryRow>> {
        let location = self.active_location()?;

        let mut rows: Vec<QcSummaryRow> = Vec::new();
        let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
        let mut entry = |rows: &mut Vec<QcSummaryRow>, product_name: &str| -> usize {
            *index.entry(product_name.to_string()).or_insert_with(|| {
                rows.push(QcSummaryRow {
                    product_name: product_name.to_string(),
                    ..Default::default()
                });
                rows.len() - 1
            })
        };

        if let Some(dough) = self.state.dough.get(location) {
            for row in dough {
                let i = entry(&mut rows, &row.product_name);
                rows[i].target = Some(row.target);
                rows[i].dough_produced = Some(row.produced);
            }
        }
        if let Some(rolling) = self.state.rolling.get(location) {
            for row in rolling {
                let i = entry(&mut rows, &row.product_name);
                rows[i].target.get_or_insert(row.target);
                rows[i].starter_produced = Some(row.starter_produced);
                rows[i].filling_produced = Some(row.filling_produced);
                rows[i].rolled_produced = Some(row.rolled_produced);
            }
        }
        if let Some(oven) = self.state.oven.get(location) {
            for row in oven {
                let i = entry(&mut rows, &row.product_name);
                rows[i].to_oven = Some(row.to_oven);
                rows[i].out_of_oven = Some(row.out_of_oven);
                rows[i].reject = Some(row.reject);
            }
        }
        if let Some(topping) = self.state.topping.get(location) {
            for row in topping {
                let i = entry(&mut rows, &row.product_name);
                rows[i].sfg = Some(row.sfg_topping);
                rows[i].fg = Some(row.fg_topping);
            }
        }

        Some(rows)
    }

    /// Close out the active location.
    ///
    /// Sets the completion flag, persists the whole state, and stamps
    /// `qcCompletedAt` onto the persisted targets snapshot (a
    /// side-channel annotation; the in-memory state keeps its own
    /// `lastUpdatedAt`). Returns the location name so the caller can
    /// route to the delivery-note view, or `Ok(None)` when no location
    /// is available. There is no way back: reopening a location takes
    /// a reset or fresh targets.
    ///
    /// Idempotent - a second call on a completed location changes
    /// nothing.
    pub fn mark_location_complete(&mut self) -> KitchenResult<Option<String>> {
        let location = match self.active_location() {
            Some(location) => location.to_string(),
            None => return Ok(None),
        };
        if self.state.is_complete(&location) {
            tracing::debug!(location = %location, "location already complete");
            return Ok(Some(location));
        }

        self.state
            .completed_locations
            .insert(location.clone(), true);
        self.save()?;
        self.annotate_qc_completed()?;
        tracing::info!(location = %location, "location marked complete by QC");
        Ok(Some(location))
    }

    // Stamp the persisted targets snapshot only. The annotation is for
    // the delivery-note view, which re-reads the snapshot on its own;
    // the nested copy inside the state snapshot is left alone.
    fn annotate_qc_completed(&self) -> KitchenResult<()> {
        let mut payload = match self.store.load(TARGETS_KEY).and_then(TargetsPayload::from_value)
        {
            Some(payload) => payload,
            None => return Ok(()),
        };
        payload.qc_completed_at = Some(Utc::now().to_rfc3339());
        self.store.save(TARGETS_KEY, &serde_json::to_value(&payload)?)?;
        Ok(())
    }
}
