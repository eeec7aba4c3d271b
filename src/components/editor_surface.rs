//! Editor Surface
//!
//! Side-by-side source and preview panes for the report being composed.
//! The source textarea is the document of record; caret and selection are
//! tracked as byte offsets so the insertion modes can operate on the text.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::insertion::utf16_to_byte;

#[component]
pub fn EditorSurface(
    content: ReadSignal<String>,
    set_content: WriteSignal<String>,
    set_caret: WriteSignal<Option<usize>>,
    set_selection: WriteSignal<Option<(usize, usize)>>,
    /// Rendered HTML for the preview pane
    preview: Signal<String>,
    /// Fired with the caret byte offset after every click in the source pane
    #[prop(into)] on_click: Callback<usize>,
) -> impl IntoView {
    let track_selection = move |textarea: &web_sys::HtmlTextAreaElement| -> Option<usize> {
        let text = content.get_untracked();
        let start = textarea.selection_start().ok().flatten()? as usize;
        let end = textarea.selection_end().ok().flatten()? as usize;
        let start_b = utf16_to_byte(&text, start);
        let end_b = utf16_to_byte(&text, end);
        set_caret.set(Some(start_b));
        set_selection.set(if start_b != end_b {
            Some((start_b, end_b))
        } else {
            None
        });
        Some(start_b)
    };

    view! {
        <div class="editor-surface">
            <div class="editor-pane">
                <div class="pane-header">"Laudo"</div>
                <textarea
                    class="report-textarea"
                    prop:value=move || content.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let textarea = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        set_content.set(textarea.value());
                        track_selection(textarea);
                    }
                    on:click=move |ev: web_sys::MouseEvent| {
                        let target = ev.target().unwrap();
                        let textarea = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        if let Some(offset) = track_selection(textarea) {
                            on_click.run(offset);
                        }
                    }
                    on:keyup=move |ev: web_sys::KeyboardEvent| {
                        let target = ev.target().unwrap();
                        let textarea = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        track_selection(textarea);
                    }
                    on:select=move |ev: web_sys::Event| {
                        let target = ev.target().unwrap();
                        let textarea = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        track_selection(textarea);
                    }
                    placeholder="Escolha um modelo ou comece a escrever..."
                ></textarea>
            </div>

            <div class="preview-pane">
                <div class="pane-header">"Pré-visualização"</div>
                <div class="preview-content" inner_html=move || preview.get()></div>
            </div>
        </div>
    }
}
