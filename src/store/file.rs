//! JSON file preference store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{PreferenceStore, StoreError};

/// A [`PreferenceStore`] persisted as a flat JSON object.
///
/// The file is read once on [`open`](JsonFileStore::open) and rewritten on
/// every [`set`](PreferenceStore::set). Keys the store does not understand are
/// carried through untouched, and non-string values read back as absent.
///
/// # Example
///
/// ```rust,no_run
/// use sitetheme::{JsonFileStore, PreferenceStore};
///
/// let mut store = JsonFileStore::open("/tmp/sitetheme/state.json").unwrap();
/// store.set("theme-preference", "dark").unwrap();
/// assert_eq!(store.get("theme-preference").as_deref(), Some("dark"));
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store. A file that is not a JSON object
    /// is treated as empty as well and will be replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => parse_object(&path, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no state file yet");
                Map::new()
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        Ok(Self { path, values })
    }

    /// Default state file location under the user's data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sitetheme")
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values).map_err(StoreError::Serialize)?;
        fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))
    }
}

fn parse_object(path: &Path, content: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!(path = %path.display(), "state file is not a JSON object; ignoring it");
            Map::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "state file is corrupted; ignoring it");
            Map::new()
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self
            .values
            .insert(key.to_string(), Value::String(value.to_string()));
        if let Err(e) = self.flush() {
            // Keep memory in step with disk.
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("theme-preference"), None);
    }

    #[test]
    fn test_set_persists_across_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("theme-preference", "dark").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme-preference").as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupted_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("theme-preference"), None);

        store.set("theme-preference", "light").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"light\""));
    }

    #[test]
    fn test_non_object_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[\"dark\"]").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("theme-preference"), None);
    }

    #[test]
    fn test_unknown_keys_survive_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"other": 42, "theme-preference": "light"}"#).unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("other"), None);
        store.set("theme-preference", "system").unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["other"], 42);
        assert_eq!(value["theme-preference"], "system");
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail.
        let path = dir.path().join("state.json");
        fs::create_dir(&path).unwrap();

        let mut store = JsonFileStore {
            path: path.clone(),
            values: Map::new(),
        };
        assert!(store.set("theme-preference", "dark").is_err());
        assert_eq!(store.get("theme-preference"), None);
    }
}
