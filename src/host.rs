/// Browser capabilities used by the popup, and their chrome.* implementation

use crate::storage::{decode_stored_tags, encode_tags};
use crate::tags::TagSet;
use async_trait::async_trait;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTabUrl() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn executeScript(code: &str) -> Result<(), JsValue>;
}

/// Access to the active tab
#[async_trait(?Send)]
pub trait TabHost {
    async fn active_tab_url(&self) -> Result<String, String>;

    /// Run `code` in the active tab
    async fn execute_script(&self, code: &str) -> Result<(), String>;
}

/// Tag sets keyed by URL
#[async_trait(?Send)]
pub trait TagStore {
    async fn load(&self, url: &str) -> Result<Option<TagSet>, String>;

    /// Overwrite the record for `url`. Other URLs are untouched.
    async fn save(&self, url: &str, tags: &TagSet) -> Result<(), String>;
}

/// chrome.tabs and chrome.storage.sync through popup.js
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeHost;

#[async_trait(?Send)]
impl TabHost for ChromeHost {
    async fn active_tab_url(&self) -> Result<String, String> {
        let url_js = getActiveTabUrl()
            .await
            .map_err(|e| format!("Failed to query active tab: {:?}", e))?;

        url_js
            .as_string()
            .ok_or_else(|| "Active tab has no URL".to_string())
    }

    async fn execute_script(&self, code: &str) -> Result<(), String> {
        executeScript(code)
            .await
            .map_err(|e| format!("Failed to inject script: {:?}", e))
    }
}

#[async_trait(?Send)]
impl TagStore for ChromeHost {
    async fn load(&self, url: &str) -> Result<Option<TagSet>, String> {
        let stored_js = getStorage(url)
            .await
            .map_err(|e| format!("Failed to get storage: {:?}", e))?;

        if stored_js.is_null() || stored_js.is_undefined() {
            return Ok(None);
        }

        let stored: serde_json::Value = serde_wasm_bindgen::from_value(stored_js)
            .map_err(|e| format!("Failed to parse storage: {:?}", e))?;

        decode_stored_tags(stored)
    }

    async fn save(&self, url: &str, tags: &TagSet) -> Result<(), String> {
        let tags_js = serde_wasm_bindgen::to_value(&encode_tags(tags)?)
            .map_err(|e| format!("Failed to serialize tags: {:?}", e))?;

        setStorage(url, tags_js)
            .await
            .map_err(|e| format!("Failed to save storage: {:?}", e))
    }
}
