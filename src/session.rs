//! Session Tokens
//!
//! The token pair is the only thing this app keeps in local storage; all
//! other cross-view state travels through typed context values.

use crate::models::TokenPair;

const ACCESS_KEY: &str = "laudo.access";
const REFRESH_KEY: &str = "laudo.refresh";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn save_tokens(tokens: &TokenPair) {
    if let Some(store) = storage() {
        let _ = store.set_item(ACCESS_KEY, &tokens.access);
        let _ = store.set_item(REFRESH_KEY, &tokens.refresh);
    }
}

pub fn load_tokens() -> Option<TokenPair> {
    let store = storage()?;
    let access = store.get_item(ACCESS_KEY).ok()??;
    let refresh = store.get_item(REFRESH_KEY).ok()??;
    Some(TokenPair { access, refresh })
}

pub fn clear_tokens() {
    if let Some(store) = storage() {
        let _ = store.remove_item(ACCESS_KEY);
        let _ = store.remove_item(REFRESH_KEY);
    }
}

pub fn is_logged_in() -> bool {
    load_tokens().is_some()
}
