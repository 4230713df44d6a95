use super::*;

use crate::domain::kitchen::{DoughRow, OvenRow, RollingRow, ToppingRow};
use crate::domain::targets::TargetProduct;
use crate::domain::types::{parse_quantity, DoughField, OvenField, RollingField, Stage, ToppingField};

// ==========================================
// Stage controller views
// ==========================================
// Each stage screen projects the active location's row list and
// writes single fields back. Reads return None when no location is
// available - an expected terminal display state, not an error.
// Writes return whether a row matched; an unknown product is a no-op.

/// Dough row joined with optional display metadata from the targets
/// payload. The metadata is not stored on the row; it is looked up by
/// product name on every projection and may be absent.
#[derive(Debug, Clone)]
pub struct JoinedDoughRow<'a> {
    pub row: &'a DoughRow,
    pub sku: Option<&'a str>,
    pub category: Option<&'a str>,
    pub unit_weight: Option<f64>,
}

/// Rolling row joined with metadata plus the derived dough reference.
#[derive(Debug, Clone)]
pub struct JoinedRollingRow<'a> {
    pub row: &'a RollingRow,
    /// Read from the dough table on every projection; Rolling never
    /// writes to Dough.
    pub dough_produced: u32,
    pub sku: Option<&'a str>,
    pub category: Option<&'a str>,
    pub unit_weight: Option<f64>,
}

impl KitchenApi {
    fn product_meta(&self, product_name: &str) -> Option<&TargetProduct> {
        self.state.targets.as_ref().and_then(|t| t.product(product_name))
    }

    // ==========================================
    // Reads
    // ==========================================

    pub fn dough_rows(&self) -> Option<&[DoughRow]> {
        let location = self.active_location()?;
        Some(self.state.dough.get(location).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn rolling_rows(&self) -> Option<&[RollingRow]> {
        let location = self.active_location()?;
        Some(self.state.rolling.get(location).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn oven_rows(&self) -> Option<&[OvenRow]> {
        let location = self.active_location()?;
        Some(self.state.oven.get(location).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn topping_rows(&self) -> Option<&[ToppingRow]> {
        let location = self.active_location()?;
        Some(self.state.topping.get(location).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Dough screen projection with the product-metadata join.
    pub fn dough_board(&self) -> Option<Vec<JoinedDoughRow<'_>>> {
        let rows = self.dough_rows()?;
        Some(
            rows.iter()
                .map(|row| {
                    let meta = self.product_meta(&row.product_name);
                    JoinedDoughRow {
                        row,
                        sku: meta.and_then(|m| m.sku.as_deref()),
                        category: meta.and_then(|m| m.category.as_deref()),
                        unit_weight: meta.and_then(|m| m.unit_weight),
                    }
                })
                .collect(),
        )
    }

    /// Rolling screen projection: metadata join plus the derived
    /// dough-produced reference column.
    pub fn rolling_board(&self) -> Option<Vec<JoinedRollingRow<'_>>> {
        let location = self.active_location()?;
        let rows = self.state.rolling.get(location).map(Vec::as_slice).unwrap_or(&[]);
        Some(
            rows.iter()
                .map(|row| {
                    let meta = self.product_meta(&row.product_name);
                    JoinedRollingRow {
                        row,
                        dough_produced: self.state.dough_produced(location, &row.product_name),
                        sku: meta.and_then(|m| m.sku.as_deref()),
                        category: meta.and_then(|m| m.category.as_deref()),
                        unit_weight: meta.and_then(|m| m.unit_weight),
                    }
                })
                .collect(),
        )
    }

    /// Derived reference for the Rolling screen: dough output for one
    /// product at the active location, 0 when unknown.
    pub fn dough_produced(&self, product_name: &str) -> u32 {
        match self.active_location() {
            Some(location) => self.state.dough_produced(location, product_name),
            None => 0,
        }
    }

    // ==========================================
    // Writes
    // ==========================================
    // Raw input goes through the global clamp rule (non-numeric -> 0,
    // floor, >= 0). Only the matching row of the active location is
    // touched; no implicit save.

    pub fn set_dough_field(&mut self, product_name: &str, field: DoughField, raw: &str) -> bool {
        let value = parse_quantity(raw);
        self.update_row(Stage::Dough, product_name, |state, location| {
            let row = find_row_mut(state.dough.get_mut(location), product_name)?;
            match field {
                DoughField::Produced => row.produced = value,
            }
            Some(())
        })
    }

    /// Free-form note on a dough row; an empty string clears it.
    pub fn set_dough_note(&mut self, product_name: &str, note: &str) -> bool {
        let note = note.trim();
        let value = if note.is_empty() { None } else { Some(note.to_string()) };
        self.update_row(Stage::Dough, product_name, |state, location| {
            let row = find_row_mut(state.dough.get_mut(location), product_name)?;
            row.note = value;
            Some(())
        })
    }

    pub fn set_rolling_field(&mut self, product_name: &str, field: RollingField, raw: &str) -> bool {
        let value = parse_quantity(raw);
        self.update_row(Stage::Rolling, product_name, |state, location| {
            let row = find_row_mut(state.rolling.get_mut(location), product_name)?;
            match field {
                RollingField::StarterNeeded => row.starter_needed = value,
                RollingField::StarterProduced => row.starter_produced = value,
                RollingField::FillingNeeded => row.filling_needed = value,
                RollingField::FillingProduced => row.filling_produced = value,
                RollingField::RolledProduced => row.rolled_produced = value,
            }
            Some(())
        })
    }

    pub fn set_oven_field(&mut self, product_name: &str, field: OvenField, raw: &str) -> bool {
        let value = parse_quantity(raw);
        self.update_row(Stage::Oven, product_name, |state, location| {
            let row = find_row_mut(state.oven.get_mut(location), product_name)?;
            match field {
                OvenField::ToOven => row.to_oven = value,
                OvenField::OutOfOven => row.out_of_oven = value,
                OvenField::Reject => row.reject = value,
            }
            Some(())
        })
    }

    pub fn set_topping_field(&mut self, product_name: &str, field: ToppingField, raw: &str) -> bool {
        let value = parse_quantity(raw);
        self.update_row(Stage::Topping, product_name, |state, location| {
            let row = find_row_mut(state.topping.get_mut(location), product_name)?;
            match field {
                ToppingField::SfgTopping => row.sfg_topping = value,
                ToppingField::FgTopping => row.fg_topping = value,
            }
            Some(())
        })
    }

    fn update_row(
        &mut self,
        stage: Stage,
        product_name: &str,
        apply: impl FnOnce(&mut KitchenState, &str) -> Option<()>,
    ) -> bool {
        let location = match self.state.active_location.clone() {
            Some(location) => location,
            None => return false,
        };
        match apply(&mut self.state, &location) {
            Some(()) => {
                self.state.touch();
                true
            }
            None => {
                tracing::debug!(%stage, product_name, location = %location, "stage write matched no row");
                false
            }
        }
    }
}

fn find_row_mut<'a, R: HasProductName>(
    rows: Option<&'a mut Vec<R>>,
    product_name: &str,
) -> Option<&'a mut R> {
    rows?.iter_mut().find(|r| r.product_name() == product_name)
}

trait HasProductName {
    fn product_name(&self) -> &str;
}

macro_rules! impl_has_product_name {
    ($($row:ty),*) => {
        $(impl HasProductName for $row {
            fn product_name(&self) -> &str {
                &self.product_name
            }
        })*
    };
}

impl_has_product_name!(DoughRow, RollingRow, OvenRow, ToppingRow);
