//! `localStorage` backend for the session store.
//!
//! Values are stored verbatim: the token as a bare string and the user as the
//! JSON the session store produces.

use gloo_storage::{LocalStorage, Storage};
use shared::session::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;

/// Session entries kept in the browser's `localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStore;

fn backend_error(err: &JsValue) -> StorageError {
    StorageError::Backend(
        err.as_string()
            .unwrap_or_else(|| format!("localStorage failure: {err:?}")),
    )
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| backend_error(&err))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| backend_error(&err))
    }
}
