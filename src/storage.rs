// localStorage helpers; a missing or blocked store reads as empty.

use serde::Serialize;
use web_sys::Storage;

pub const SETTINGS_KEY: &str = "poopy_snake_settings";
pub const BEST_KEY: &str = "poopy_snake_best";

fn store() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn get_item(key: &str) -> Option<String> {
    store()?.get_item(key).ok().flatten()
}

pub fn set_item(key: &str, value: &str) {
    if let Some(store) = store() {
        if store.set_item(key, value).is_err() {
            log::warn!("could not persist `{}`", key);
        }
    }
}

pub fn remove_item(key: &str) {
    if let Some(store) = store() {
        let _ = store.remove_item(key);
    }
}

pub fn set_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => set_item(key, &s),
        Err(e) => log::error!("could not encode `{}`: {}", key, e),
    }
}

pub fn load_best() -> u32 {
    get_item(BEST_KEY)
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0)
}

pub fn save_best(points: u32) {
    set_item(BEST_KEY, &points.to_string());
}
