// ==========================================
// KitchenState derivation tests
// ==========================================
// Build rules: location order, row shapes, target snapshots.
// ==========================================


use roti_kitchen::{KitchenState, TargetsPayload};
use serde_json::json;
use test_helpers::sample_payload;

#[test]
fn test_null_payload_builds_default_state() {
    let state = KitchenState::build_from_targets(None);
    assert!(state.locations.is_empty());
    assert!(state.active_location.is_none());
    assert!(state.dough.is_empty());
    assert!(state.rolling.is_empty());
    assert!(state.oven.is_empty());
    assert!(state.topping.is_empty());
    assert!(state.completed_locations.is_empty());
    assert!(state.targets.is_none());
}

#[test]
fn test_all_stage_tables_sized_per_product() {
    let payload = sample_payload();
    let state = KitchenState::build_from_targets(Some(&payload));

    assert_eq!(state.locations.len(), 2);
    for loc in &state.locations {
        assert_eq!(state.dough[loc].len(), payload.products.len());
        assert_eq!(state.rolling[loc].len(), payload.products.len());
        assert_eq!(state.oven[loc].len(), payload.products.len());
        assert_eq!(state.topping[loc].len(), payload.products.len());
    }
}

#[test]
fn test_two_locations_one_product_scenario() {
    let payload = TargetsPayload::from_value(json!({
        "summaryPerLocation": { "A": 10, "B": 5 },
        "products": [{ "productName": "Bun", "totals": { "A": 10, "B": 5 } }]
    }))
    .unwrap();
    let state = KitchenState::build_from_targets(Some(&payload));

    assert_eq!(state.locations, vec!["A", "B"]);
    assert_eq!(state.active_location.as_deref(), Some("A"));

    let dough_a = &state.dough["A"];
    assert_eq!(dough_a.len(), 1);
    assert_eq!(dough_a[0].product_name, "Bun");
    assert_eq!(dough_a[0].target, 10);
    assert_eq!(dough_a[0].produced, 0);

    let dough_b = &state.dough["B"];
    assert_eq!(dough_b[0].target, 5);
    assert_eq!(dough_b[0].produced, 0);
}

#[test]
fn test_location_order_follows_payload_key_order() {
    let payload = TargetsPayload::from_value(json!({
        "summaryPerLocation": { "Zebra": 1, "Alpha": 2, "Mid": 3 }
    }))
    .unwrap();
    let state = KitchenState::build_from_targets(Some(&payload));
    assert_eq!(state.locations, vec!["Zebra", "Alpha", "Mid"]);
    assert_eq!(state.active_location.as_deref(), Some("Zebra"));
}

#[test]
fn test_product_names_match_across_stage_tables() {
    let payload = sample_payload();
    let state = KitchenState::build_from_targets(Some(&payload));

    for loc in &state.locations {
        let names: Vec<&str> = state.dough[loc].iter().map(|r| r.product_name.as_str()).collect();
        let rolling: Vec<&str> =
            state.rolling[loc].iter().map(|r| r.product_name.as_str()).collect();
        let oven: Vec<&str> = state.oven[loc].iter().map(|r| r.product_name.as_str()).collect();
        let topping: Vec<&str> =
            state.topping[loc].iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, rolling);
        assert_eq!(names, oven);
        assert_eq!(names, topping);
    }
}

#[test]
fn test_missing_totals_default_to_zero_target() {
    let payload = sample_payload();
    let state = KitchenState::build_from_targets(Some(&payload));
    // Cheese Roll has no Senopati total
    assert_eq!(state.dough["Senopati"][1].target, 0);
    assert_eq!(state.rolling["Senopati"][1].target, 0);
}

#[test]
fn test_payload_without_products_yields_empty_rows() {
    let payload = TargetsPayload::from_value(json!({
        "summaryPerLocation": { "A": 0 }
    }))
    .unwrap();
    let state = KitchenState::build_from_targets(Some(&payload));
    assert_eq!(state.locations, vec!["A"]);
    assert!(state.dough["A"].is_empty());
    assert!(state.topping["A"].is_empty());
}
