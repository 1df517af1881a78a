//! Persistent key-value storage for the theme preference.
//!
//! - [`PreferenceStore`]: the get/set port the controller persists through
//! - [`MemoryStore`]: process-local store, useful for tests and embedding
//! - [`JsonFileStore`]: a JSON object on disk, one entry per key
//! - [`StoreError`]: failures from the file-backed store

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// A string key-value store holding persisted preferences.
///
/// Reads never fail: a store that cannot produce a value reports `None` and
/// the caller falls back to its default. Writes overwrite any existing value.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing the previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
