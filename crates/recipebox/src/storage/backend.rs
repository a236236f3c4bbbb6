//! Key-value storage port.
//!
//! The recipe store only ever needs to read and write one text value by key.
//! [`KeyValueStore`] captures that, so the store can run against `SQLite` in
//! the CLI and against [`MemoryStore`] in tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::trace;

use crate::error::BackendError;

/// A namespace of text values addressed by string keys.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), BackendError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).write(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).write(key, value)
    }
}

/// Process-local backend holding values in a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn len(&self) -> Result<usize, BackendError> {
        Ok(self.lock()?.len())
    }

    /// Whether no keys are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, BackendError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, BackendError> {
        self.entries
            .lock()
            .map_err(|_| BackendError::unavailable("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError> {
        let value = self.lock()?.get(key).cloned();
        trace!("memory read {} ({} bytes)", key, value.as_ref().map_or(0, String::len));
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        trace!("memory write {} ({} bytes)", key, value.len());
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
