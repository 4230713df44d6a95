// ==========================================
// Roti Goolung Kitchen Core - File Store
// ==========================================
// One JSON file per key inside a session directory. The directory
// stands in for browser session storage: the shell that owns the
// session removes it when the shift ends.
// ==========================================

use crate::store::{SessionStore, StoreError, StoreResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", dir.display(), e)))?;
        Ok(FileStore { dir })
    }

    /// Store under the user cache dir, namespaced by session id.
    pub fn for_session(session_id: &str) -> StoreResult<Self> {
        let base = dirs::cache_dir()
            .ok_or_else(|| StoreError::Unavailable("no user cache directory".to_string()))?;
        Self::new(base.join("roti-kitchen").join("sessions").join(session_id))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionStore for FileStore {
    fn load(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(key, path = %path.display(), error = %err, "snapshot read failed, treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "malformed snapshot, treating as absent");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &Value) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), raw).map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(err) = fs::remove_file(&path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(key, path = %path.display(), error = %err, "snapshot remove failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_load_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("session")).unwrap();

        assert!(store.load("k").is_none());
        store.save("k", &json!([1, 2, 3])).unwrap();
        assert_eq!(store.load("k"), Some(json!([1, 2, 3])));

        store.remove("k");
        assert!(store.load("k").is_none());
        store.remove("k");
    }

    #[test]
    fn test_corrupt_file_loads_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path()).unwrap();
        fs::write(store.dir().join("k.json"), "{broken").unwrap();
        assert!(store.load("k").is_none());
    }
}
