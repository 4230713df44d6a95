// ==========================================
// Roti Goolung Kitchen Core - CLI Shell
// ==========================================
// Inspection tool: load a targets payload from disk, print the batch
// board the way the stage screens would see it, optionally emit the
// CSV recap for one location. Display only - no new semantics.
// ==========================================

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use roti_kitchen::{
    logging, KitchenApi, KitchenConfig, MemoryStore, ProductionApi, QcSummaryRow, TargetsPayload,
};

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, csv_location) = match args.as_slice() {
        [path] => (path.clone(), None),
        [path, flag, location] if flag == "--csv" => (path.clone(), Some(location.clone())),
        _ => bail!("usage: roti-kitchen <targets.json> [--csv <location>]"),
    };

    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;
    let payload = TargetsPayload::from_value(value)
        .with_context(|| format!("{} is not a targets payload", path))?;

    let store = Arc::new(MemoryStore::new());
    let mut kitchen = KitchenApi::new(store.clone());
    kitchen.set_targets(Some(payload))?;

    print_board(&mut kitchen)?;

    if let Some(location) = csv_location {
        let production = ProductionApi::new(store, KitchenConfig::default());
        println!();
        print!("{}", production.export_location_csv(&location)?);
    }

    Ok(())
}

fn print_board(kitchen: &mut KitchenApi) -> Result<()> {
    let meta = kitchen
        .state()
        .targets
        .as_ref()
        .map(|t| t.meta.clone())
        .unwrap_or_default();
    println!(
        "batch: date={} status={}",
        meta.target_date.as_deref().unwrap_or("-"),
        meta.status.as_deref().unwrap_or("-"),
    );

    let locations = kitchen.state().locations.clone();
    if locations.is_empty() {
        println!("no location available");
        return Ok(());
    }

    for location in locations {
        kitchen.set_active_location(&location)?;
        println!("\n== {} ==", location);
        println!(
            "{:<24} {:>7} {:>7} {:>7} {:>7} {:>7}",
            "product", "target", "dough", "rolled", "oven", "fg"
        );
        for row in kitchen.qc_summary().unwrap_or_default() {
            println!(
                "{:<24} {:>7} {:>7} {:>7} {:>7} {:>7}",
                row.product_name,
                QcSummaryRow::cell(row.target),
                QcSummaryRow::cell(row.dough_produced),
                QcSummaryRow::cell(row.rolled_produced),
                QcSummaryRow::cell(row.out_of_oven),
                QcSummaryRow::cell(row.fg),
            );
        }
    }

    Ok(())
}
