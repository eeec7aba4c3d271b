//! Runtime Configuration
//!
//! The API base URL can be overridden per deployment with a
//! `<meta name="api-base" content="...">` tag in the host page.

use wasm_bindgen::JsCast;

const DEFAULT_API_BASE: &str = "https://api.laudos.app";

/// Base URL for all REST calls, without a trailing slash.
pub fn api_base() -> String {
    let from_meta = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(r#"meta[name="api-base"]"#).ok().flatten())
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content());

    match from_meta {
        Some(content) if !content.trim().is_empty() => {
            content.trim().trim_end_matches('/').to_string()
        }
        _ => DEFAULT_API_BASE.to_string(),
    }
}
