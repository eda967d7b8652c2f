use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;
use workout_tracker_lib::{error::StoreError, store::KeyValueStore};

/// The browser's local storage, scoped to the site origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        LocalStorage::raw().get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw().set_item(key, value).map_err(backend_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        LocalStorage::raw().remove_item(key).map_err(backend_error)
    }
}

fn backend_error(err: JsValue) -> StoreError {
    StoreError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
