//! Client-local key-value storage.
//!
//! The credential vault and the security log persist small JSON documents under fixed
//! string keys. This crate provides the [`KeyValueStore`] seam they write through and two
//! backends:
//!
//! - **[`MemoryStore`]**: a process-local map, used by tests and ephemeral sessions.
//! - **[`FileStore`]**: a single JSON document on disk. Every mutation rewrites the file
//!   with an "atomic swap" (unique temp file + `fsync` + `rename`), so a crash never
//!   leaves a half-written store behind. Orphaned temp files from earlier crashes are
//!   removed when the store is opened.
//!
//! The store enforces no schema: values are opaque strings.
//!
//! # Example
//!
//! ```rust
//! use jobchat_storage::{FileStore, KeyValueStore, StorageError};
//!
//! # fn main() -> Result<(), StorageError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! let store = FileStore::open(tmp.path().join("store.json"))?;
//!
//! store.set("greeting", "\"hello\"")?;
//! assert_eq!(store.get("greeting")?.as_deref(), Some("\"hello\""));
//!
//! store.remove("greeting")?;
//! store.remove("greeting")?; // idempotent
//! assert!(!store.contains("greeting")?);
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;

pub use error::{StorageError, StorageErrorExt};
pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

/// String blobs under string keys.
///
/// Implementations must make each individual call atomic with respect to other calls on
/// the same store; callers needing multi-key consistency coordinate themselves.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StorageError`] if the key is invalid or the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Returns `true` if a value is stored under `key`.
    ///
    /// # Errors
    /// Returns [`StorageError`] if the backend cannot be read.
    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        (**self).contains(key)
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey {
            message: "Storage key cannot be empty".into(),
            context: None,
        });
    }
    Ok(())
}
