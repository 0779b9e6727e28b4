//! Key-value persistence used by the ranking store.
//!
//! The ranking store only needs `get`, `set` and `remove` on opaque blobs,
//! the same contract a browser's local storage offers. Two backends ship
//! with the crate:
//!
//! - `MemoryStore`: in-process map, for tests and ephemeral sessions
//! - `FileStore`: one file per key under a directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::StorageError;

/// Blob storage keyed by string.
pub trait KeyValueStore {
    /// Read a blob. `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write a blob, replacing any previous value.
    fn set(&mut self, key: &str, blob: &[u8]) -> Result<(), StorageError>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, blob: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, blob)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
