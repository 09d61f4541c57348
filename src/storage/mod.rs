use crate::notes::ViewFilter;
use serde::{Deserialize, Serialize};

/// Legacy token key; the session itself lives in a cookie, but logout still
/// scrubs anything a previous build may have left behind.
pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const ACTIVE_VIEW_KEY: &str = "notes_active_view";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn load_active_view() -> ViewFilter {
    load_json_from_storage::<ViewFilter>(ACTIVE_VIEW_KEY).unwrap_or_default()
}

pub(crate) fn save_active_view(view: ViewFilter) {
    save_json_to_storage(ACTIVE_VIEW_KEY, &view);
}

/// Client-side token artifacts cleared at logout.
pub(crate) trait TokenStore {
    fn clear_tokens(&self);
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn clear_tokens(&self) {
        for storage in [local_storage(), session_storage()].into_iter().flatten() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}
