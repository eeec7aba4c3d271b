//! Clipboard Export
//!
//! Dual-format copy: the finished report goes out as text/html plus
//! text/plain in a single clipboard item, so rich editors paste formatting
//! and plain targets get clean text. Falls back to writeText when the
//! ClipboardItem path is rejected.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, ClipboardItem};

pub async fn copy_dual(html: &str, plain: &str) -> Result<(), String> {
    let clipboard = web_sys::window()
        .ok_or("sem janela")?
        .navigator()
        .clipboard();

    match write_item(&clipboard, html, plain).await {
        Ok(()) => Ok(()),
        Err(_) => {
            // Permission or support problem with ClipboardItem; plain text
            // still beats failing the copy outright.
            JsFuture::from(clipboard.write_text(plain))
                .await
                .map(|_| ())
                .map_err(|e| js_error(&e))
        }
    }
}

async fn write_item(
    clipboard: &web_sys::Clipboard,
    html: &str,
    plain: &str,
) -> Result<(), JsValue> {
    let record = js_sys::Object::new();
    js_sys::Reflect::set(
        &record,
        &"text/html".into(),
        &js_sys::Promise::resolve(&blob_of(html, "text/html")?),
    )?;
    js_sys::Reflect::set(
        &record,
        &"text/plain".into(),
        &js_sys::Promise::resolve(&blob_of(plain, "text/plain")?),
    )?;

    let item = ClipboardItem::new_with_record_from_str_to_blob_promise(&record)?;
    let items = js_sys::Array::of1(&item);
    JsFuture::from(clipboard.write(&items)).await.map(|_| ())
}

fn blob_of(content: &str, mime: &str) -> Result<Blob, JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_str_sequence_and_options(&parts, &options)
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| "falha ao copiar para a área de transferência".to_string())
}
