//! Key-value persistence behind a substitutable store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser adapter backs [`KeyValueStore`] with `localStorage`; native
//! builds and tests use [`MemoryStore`]. [`Storage`] layers JSON values on
//! top and swallows every failure: reads fall back to the caller's default,
//! writes report `false`, and the cause goes to the log.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Raw string storage, shaped after the Web Storage API.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// JSON values over a [`KeyValueStore`].
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read and decode `key`, or return `default` when it is missing, empty,
    /// unreadable, or not valid JSON for `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                log::error!("error reading from storage key {key:?}: {err}");
                default
            }
        }
    }

    /// Encode and store `value` under `key`. Returns whether the write landed.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.store.set_item(key, &raw));
        match result {
            Ok(()) => true,
            Err(err) => {
                log::error!("error writing to storage key {key:?}: {err}");
                false
            }
        }
    }

    /// Delete `key`. Returns whether the removal landed.
    pub fn remove(&self, key: &str) -> bool {
        match self.store.remove_item(key) {
            Ok(()) => true,
            Err(err) => {
                log::error!("error removing storage key {key:?}: {err}");
                false
            }
        }
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get_item(key)? {
            Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }
}

/// Read a raw string value, logging and hiding any failure.
#[must_use]
pub fn read_raw(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value,
        Err(err) => {
            log::error!("error reading from storage key {key:?}: {err}");
            None
        }
    }
}

/// Write a raw string value, logging any failure.
pub fn write_raw(store: &dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set_item(key, value) {
        Ok(()) => true,
        Err(err) => {
            log::error!("error writing to storage key {key:?}: {err}");
            false
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;
