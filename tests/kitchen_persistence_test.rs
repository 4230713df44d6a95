// ==========================================
// Snapshot persistence tests
// ==========================================
// Save/restore round trips, snapshot precedence, reset semantics,
// and the fail-open load policy.
// ==========================================


use roti_kitchen::{
    DoughField, FileStore, KitchenApi, KitchenError, KitchenState, SessionStore,
    KITCHEN_STATE_KEY, TARGETS_KEY,
};
use std::sync::Arc;
use test_helpers::{memory_store, sample_payload, sample_targets_value, FailingStore};

#[test]
fn test_save_then_restore_reproduces_state() {
    let store = memory_store();
    let mut api = KitchenApi::new(store.clone());
    api.set_targets(Some(sample_payload())).unwrap();
    assert!(api.set_dough_field("Bun", DoughField::Produced, "8"));
    api.save().unwrap();

    let restored = KitchenApi::new(store);
    let mut expected = api.state().clone();
    let mut actual = restored.state().clone();
    // the timestamp is expected to differ between saves
    expected.last_updated_at = None;
    actual.last_updated_at = None;
    assert_eq!(actual, expected);
    assert_eq!(restored.state().dough["Kemang"][0].produced, 8);
}

#[test]
fn test_state_snapshot_takes_precedence_over_targets_snapshot() {
    let store = memory_store();
    let mut api = KitchenApi::new(store.clone());
    api.set_targets(Some(sample_payload())).unwrap();
    assert!(api.set_dough_field("Bun", DoughField::Produced, "8"));
    api.save().unwrap();

    // A stale targets snapshot alone must not wipe saved progress.
    store.save(TARGETS_KEY, &sample_targets_value()).unwrap();
    let restored = KitchenApi::new(store);
    assert_eq!(restored.state().dough["Kemang"][0].produced, 8);
}

#[test]
fn test_targets_snapshot_used_when_no_state_snapshot() {
    let store = memory_store();
    store.save(TARGETS_KEY, &sample_targets_value()).unwrap();

    let api = KitchenApi::new(store);
    assert_eq!(api.state().locations, vec!["Kemang", "Senopati"]);
    assert_eq!(api.state().dough["Kemang"][0].target, 10);
}

#[test]
fn test_empty_store_starts_default() {
    let api = KitchenApi::new(memory_store());
    assert_eq!(api.state(), &KitchenState::default());
}

#[test]
fn test_malformed_state_snapshot_falls_back_to_targets() {
    let store = memory_store();
    store.seed_raw(KITCHEN_STATE_KEY, "{definitely not json");
    store.save(TARGETS_KEY, &sample_targets_value()).unwrap();

    let api = KitchenApi::new(store);
    assert_eq!(api.state().locations.len(), 2);
    assert_eq!(api.state().dough["Kemang"][0].produced, 0);
}

#[test]
fn test_reset_clears_both_keys_and_state() {
    let store = memory_store();
    let mut api = KitchenApi::new(store.clone());
    api.set_targets(Some(sample_payload())).unwrap();
    api.save().unwrap();

    api.reset();
    assert!(store.load(TARGETS_KEY).is_none());
    assert!(store.load(KITCHEN_STATE_KEY).is_none());
    assert_eq!(api.state(), &KitchenState::default());

    // idempotent
    api.reset();
    assert_eq!(api.state(), &KitchenState::default());
}

#[test]
fn test_set_targets_none_clears_both_keys() {
    let store = memory_store();
    let mut api = KitchenApi::new(store.clone());
    api.set_targets(Some(sample_payload())).unwrap();
    assert!(store.load(TARGETS_KEY).is_some());
    assert!(store.load(KITCHEN_STATE_KEY).is_some());

    api.set_targets(None).unwrap();
    assert!(store.load(TARGETS_KEY).is_none());
    assert!(store.load(KITCHEN_STATE_KEY).is_none());
    assert_eq!(api.state(), &KitchenState::default());
}

#[test]
fn test_set_targets_discards_prior_progress() {
    let store = memory_store();
    let mut api = KitchenApi::new(store);
    api.set_targets(Some(sample_payload())).unwrap();
    assert!(api.set_dough_field("Bun", DoughField::Produced, "8"));

    api.set_targets(Some(sample_payload())).unwrap();
    assert_eq!(api.state().dough["Kemang"][0].produced, 0);
}

#[test]
fn test_save_failure_surfaces_error_and_keeps_state() {
    let mut api = KitchenApi::new(Arc::new(FailingStore));
    api.mutate(|state| {
        state.locations.push("Kemang".to_string());
        state.active_location = Some("Kemang".to_string());
    });

    let err = api.save().unwrap_err();
    assert!(matches!(err, KitchenError::Store(_)));
    // in-memory state survives the failed save
    assert_eq!(api.state().locations, vec!["Kemang"]);
}

#[test]
fn test_round_trip_through_file_store() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(tmp.path().join("session")).unwrap());

    let mut api = KitchenApi::new(store.clone());
    api.set_targets(Some(sample_payload())).unwrap();
    assert!(api.set_dough_field("Cheese Roll", DoughField::Produced, "3"));
    api.save().unwrap();

    let restored = KitchenApi::new(store);
    assert_eq!(restored.state().dough["Kemang"][1].produced, 3);
    assert_eq!(restored.state().locations, vec!["Kemang", "Senopati"]);
}
