use crate::core::{StoreError, ThemeStorage};
use web_sys as web;

/// `window.localStorage` behind the store's persistence seam.
///
/// When the browser denies storage (private modes, sandboxed frames) reads
/// report nothing saved and writes fail, so the theme still runs.
pub struct LocalStorage {
    inner: Option<web::Storage>,
}

impl LocalStorage {
    pub fn open(window: &web::Window) -> Self {
        let inner = match window.local_storage() {
            Ok(Some(s)) => Some(s),
            Ok(None) => {
                log::warn!("[storage] localStorage unavailable; theme choice will not persist");
                None
            }
            Err(e) => {
                log::warn!("[storage] localStorage denied: {:?}", e);
                None
            }
        };
        Self { inner }
    }

    fn storage(&self) -> Result<&web::Storage, StoreError> {
        self.inner
            .as_ref()
            .ok_or_else(|| StoreError::Storage("localStorage unavailable".to_string()))
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Storage(format!("{:?}", e))
}

impl ThemeStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match &self.inner {
            Some(s) => s.get_item(key).map_err(js_err),
            None => Ok(None),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match &self.inner {
            Some(s) => s.remove_item(key).map_err(js_err),
            None => Ok(()),
        }
    }
}
