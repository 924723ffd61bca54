//! Persistent key/value storage for client state.
//!
//! One API, two backends: `localStorage` in the browser, JSON files under
//! the platform config directory (`~/.config/opsboard/` on Linux) on
//! desktop.

use serde::{de::DeserializeOwned, Serialize};

/// Persist a value under `key`. Returns `true` on success.
pub fn save<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => backend::save_raw(key, &json),
        Err(_) => false,
    }
}

/// Load a value, or `None` if the key is absent or does not decode.
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = backend::load_raw(key)?;
    serde_json::from_str(&json).ok()
}

/// Drop a stored value.
pub fn remove(key: &str) {
    backend::remove_raw(key);
}

#[cfg(target_arch = "wasm32")]
mod backend {
    pub fn save_raw(key: &str, value: &str) -> bool {
        local_storage()
            .map(|storage| storage.set_item(key, value).is_ok())
            .unwrap_or(false)
    }

    pub fn load_raw(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    pub fn remove_raw(key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::path::PathBuf;

    pub fn save_raw(key: &str, value: &str) -> bool {
        let Some(path) = file_path(key) else {
            return false;
        };
        std::fs::write(path, value).is_ok()
    }

    pub fn load_raw(key: &str) -> Option<String> {
        std::fs::read_to_string(file_path(key)?).ok()
    }

    pub fn remove_raw(key: &str) {
        if let Some(path) = file_path(key) {
            let _ = std::fs::remove_file(path);
        }
    }

    fn file_path(key: &str) -> Option<PathBuf> {
        let app_dir = dirs::config_dir()?.join("opsboard");
        if !app_dir.exists() {
            std::fs::create_dir_all(&app_dir).ok()?;
        }
        // Keys become file names; strip anything path-like.
        let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
        Some(app_dir.join(format!("{safe_key}.json")))
    }
}
