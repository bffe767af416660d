//! Key-value persistence
//!
//! The game persists a single integer (the high score) plus an optional
//! config override. Storage is a plain string key-value store; integer
//! access is layered on top and treats anything unparseable as absent.

mod memory;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::error::StorageError;

/// String key-value store (LocalStorage on web, in-memory elsewhere)
pub trait KeyValueStore {
    /// Raw value for `key`, if any
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a raw value
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Integer view of `key`. Missing, malformed or negative values are `None`.
    fn get_int(&self, key: &str) -> Option<u64> {
        let raw = self.get_item(key)?;
        match raw.trim().parse::<u64>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring malformed value for `{}`: {:?}", key, raw);
                None
            }
        }
    }

    /// Write an integer value
    fn set_int(&mut self, key: &str, value: u64) -> Result<(), StorageError> {
        self.set_item(key, &value.to_string())
    }
}
