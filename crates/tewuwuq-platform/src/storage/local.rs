//! `window.localStorage` backend.
//!
//! The browser API is synchronous; the async trait methods complete on
//! first poll. Quota and security errors come back as `ChatError::Storage`.

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use tewuwuq_core::ports::StoragePort;
use tewuwuq_types::{ChatError, Result};

const WRITE_CHECK_KEY: &str = "__tewuwuq_write_check__";

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open `localStorage`, checking that it accepts writes.
    /// Private browsing modes may expose the object but throw on `setItem`.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(storage_err)?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;

        storage.set_item(WRITE_CHECK_KEY, "1").map_err(storage_err)?;
        storage.remove_item(WRITE_CHECK_KEY).map_err(storage_err)?;

        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(storage_err)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_err)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}

fn storage_err(e: JsValue) -> ChatError {
    ChatError::Storage(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}
