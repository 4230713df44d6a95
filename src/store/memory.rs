// ==========================================
// Roti Goolung Kitchen Core - In-Memory Store
// ==========================================
// Test double and headless-use implementation of the snapshot
// store. Entries are kept as serialized strings so the load path
// exercises the same parse-failure handling as a real backing store.
// ==========================================

use crate::store::{SessionStore, StoreResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw (possibly malformed) entry. Test hook for snapshots
    /// that predate this implementation.
    pub fn seed_raw(&self, key: &str, raw: &str) {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), raw.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .contains_key(key)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock().expect("memory store lock poisoned");
        let raw = entries.get(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "malformed snapshot, treating as absent");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &Value) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), raw);
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_load_remove() {
        let store = MemoryStore::new();
        assert!(store.load("k").is_none());

        store.save("k", &json!({ "a": 1 })).unwrap();
        assert_eq!(store.load("k"), Some(json!({ "a": 1 })));
        assert!(store.contains("k"));

        store.remove("k");
        assert!(store.load("k").is_none());
        // remove is idempotent
        store.remove("k");
    }

    #[test]
    fn test_malformed_entry_loads_as_absent() {
        let store = MemoryStore::new();
        store.seed_raw("k", "{not json");
        assert!(store.load("k").is_none());
        // the broken entry stays put; load never mutates
        assert!(store.contains("k"));
    }
}
