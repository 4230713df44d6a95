// ==========================================
// Roti Goolung Kitchen Core - Production API
// ==========================================
// Controller for the standalone Kitchen Production page: a flat
// target-vs-produced tracker over the same targets payload, with its
// own snapshot and no tie to the staged kitchen workflow.
// ==========================================

use std::sync::Arc;

use crate::api::error::KitchenResult;
use crate::config::KitchenConfig;
use crate::domain::production::ProductionState;
use crate::domain::targets::TargetsPayload;
use crate::domain::types::parse_quantity;
use crate::store::{SessionStore, PRODUCTION_STATE_KEY, TARGETS_KEY};

// ==========================================
// Shortfall - one under-target product line
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub product_name: String,
    pub target: u32,
    pub produced: u32,
}

impl Shortfall {
    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.produced)
    }
}

// ==========================================
// ProductionApi
// ==========================================
pub struct ProductionApi {
    store: Arc<dyn SessionStore>,
    config: KitchenConfig,
    targets: Option<TargetsPayload>,
    state: ProductionState,
}

impl ProductionApi {
    /// Restore from the session store.
    ///
    /// A saved production snapshot is adopted as-is, even when the
    /// targets snapshot has since changed underneath it - the page
    /// historically preferred preserving progress over detecting the
    /// mismatch. `strict_targets_match` opts into discarding a
    /// snapshot whose location x product grid no longer matches.
    /// Without a snapshot the grid is zero-filled from the targets,
    /// which may also arrive later via `adopt_targets`.
    pub fn new(store: Arc<dyn SessionStore>, config: KitchenConfig) -> Self {
        let targets = store.load(TARGETS_KEY).and_then(TargetsPayload::from_value);
        let saved = store
            .load(PRODUCTION_STATE_KEY)
            .and_then(|raw| match serde_json::from_value::<ProductionState>(raw) {
                Ok(state) => Some(state),
                Err(err) => {
                    tracing::warn!(error = %err, "production snapshot unreadable, treating as absent");
                    None
                }
            });

        let state = match (saved, &targets) {
            (Some(saved), Some(payload))
                if config.strict_targets_match && !saved.matches_targets(payload) =>
            {
                tracing::info!("production snapshot stale against targets, rebuilding");
                ProductionState::build_from_targets(payload)
            }
            (Some(saved), _) => saved,
            (None, Some(payload)) => ProductionState::build_from_targets(payload),
            (None, None) => ProductionState::default(),
        };

        ProductionApi {
            store,
            config,
            targets,
            state,
        }
    }

    pub fn state(&self) -> &ProductionState {
        &self.state
    }

    pub fn targets(&self) -> Option<&TargetsPayload> {
        self.targets.as_ref()
    }

    /// Late targets arrival (the page can render before the planning
    /// screen hands over). Zero-fills the grid only when nothing has
    /// been tracked yet; an existing grid is kept, stale or not,
    /// unless strict matching says otherwise.
    pub fn adopt_targets(&mut self, payload: TargetsPayload) {
        let rebuild = self.state.production.is_empty()
            || (self.config.strict_targets_match && !self.state.matches_targets(&payload));
        if rebuild {
            self.state = ProductionState::build_from_targets(&payload);
        }
        self.targets = Some(payload);
    }

    /// Record produced quantity for one cell. Returns the clamped
    /// value actually stored.
    pub fn set_produced_value(&mut self, location: &str, product_name: &str, raw: &str) -> u32 {
        let value = parse_quantity(raw);
        self.state
            .production
            .entry(location.to_string())
            .or_default()
            .insert(product_name.to_string(), value);
        self.state.touch();
        value
    }

    /// Products still short of target for one location, in targets
    /// order. Empty when targets are unknown.
    pub fn shortfalls(&self, location: &str) -> Vec<Shortfall> {
        let payload = match &self.targets {
            Some(payload) => payload,
            None => return Vec::new(),
        };
        payload
            .products
            .iter()
            .filter_map(|product| {
                let target = product.target_for(location);
                let produced = self.state.produced(location, &product.product_name);
                (produced < target).then(|| Shortfall {
                    product_name: product.product_name.clone(),
                    target,
                    produced,
                })
            })
            .collect()
    }

    /// Mark one location complete, gated on confirmation when any
    /// product is under target.
    ///
    /// `confirm` is only invoked when shortfalls exist; declining
    /// aborts the whole completion with no partial commit. On commit
    /// the flag is set and the snapshot persisted. Returns whether the
    /// completion went through.
    pub fn mark_location_complete(
        &mut self,
        location: &str,
        confirm: impl FnOnce(&[Shortfall]) -> bool,
    ) -> KitchenResult<bool> {
        let shortfalls = self.shortfalls(location);
        if !shortfalls.is_empty() && !confirm(&shortfalls) {
            tracing::info!(location, short = shortfalls.len(), "completion declined by operator");
            return Ok(false);
        }

        self.state
            .completed_locations
            .insert(location.to_string(), true);
        self.state.touch();
        self.save()?;
        tracing::info!(location, "production location marked complete");
        Ok(true)
    }

    /// CSV recap for one location: header
    /// `product,target,produced,remaining`, one line per product in
    /// targets order, `remaining = max(0, target - produced)`. Pure
    /// derivation, no state change.
    pub fn export_location_csv(&self, location: &str) -> KitchenResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(Vec::new());
        writer
            .write_record(["product", "target", "produced", "remaining"])
            .map_err(anyhow::Error::from)?;

        if let Some(payload) = &self.targets {
            for product in &payload.products {
                let target = product.target_for(location);
                let produced = self.state.produced(location, &product.product_name);
                let remaining = target.saturating_sub(produced);
                writer
                    .write_record([
                        product.product_name.as_str(),
                        &target.to_string(),
                        &produced.to_string(),
                        &remaining.to_string(),
                    ])
                    .map_err(anyhow::Error::from)?;
            }
        }

        let bytes = writer.into_inner().map_err(|e| anyhow::Error::from(e.into_error()))?;
        Ok(String::from_utf8(bytes).map_err(anyhow::Error::from)?)
    }

    /// Persist the production snapshot.
    pub fn save(&mut self) -> KitchenResult<()> {
        self.state.touch();
        self.store
            .save(PRODUCTION_STATE_KEY, &serde_json::to_value(&self.state)?)?;
        tracing::debug!("production state saved");
        Ok(())
    }

    /// Drop the snapshot and start the tracker over. When targets are
    /// known the grid is zero-filled again, mirroring the page's
    /// re-init on an empty tracker.
    pub fn reset(&mut self) {
        self.store.remove(PRODUCTION_STATE_KEY);
        self.state = match &self.targets {
            Some(payload) => ProductionState::build_from_targets(payload),
            None => ProductionState::default(),
        };
        tracing::info!("production state reset");
    }
}
