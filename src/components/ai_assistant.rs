//! AI Assistant View
//!
//! Turns free-form clinical findings into a draft report through the
//! backend's AI endpoints. The Markdown answer is previewed as styled HTML
//! and can be handed to the composer as a snippet.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::context::{AppContext, View};
use crate::markdown;
use crate::store::{use_catalog, CatalogStoreFields};

#[component]
pub fn AiAssistant() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let catalog = use_catalog();

    let (findings, set_findings) = signal(String::new());
    let (method, set_method) = signal(String::new());
    let (template_id, set_template_id) = signal(0u32);
    let (draft, set_draft) = signal(String::new());
    let (suggestions, set_suggestions) = signal(Vec::<String>::new());
    let (busy, set_busy) = signal(false);

    let generate = move |_| {
        let input = findings.get().trim().to_string();
        if input.is_empty() {
            ctx.toast_error("Descreva os achados primeiro");
            return;
        }
        let chosen_method = method.get();
        let tid = template_id.get();
        let body = catalog
            .templates()
            .get_untracked()
            .into_iter()
            .find(|t| tid != 0 && t.id == tid)
            .map(|t| t.body);
        set_busy.set(true);
        spawn_local(async move {
            let result = if chosen_method.is_empty() {
                api::generate_report(&input).await
            } else {
                api::generate_radiology_report(&chosen_method, &input, body.as_deref()).await
            };
            set_busy.set(false);
            match result {
                Ok(text) => set_draft.set(text),
                Err(e) => ctx.toast_error(format!("Falha na geração: {}", e)),
            }
        });
    };

    let suggest = move |_| {
        let context_text = {
            let d = draft.get();
            if d.trim().is_empty() { findings.get() } else { d }
        };
        if context_text.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            match api::generate_suggestions(&context_text).await {
                Ok(list) => set_suggestions.set(list),
                Err(e) => ctx.toast_error(format!("Falha nas sugestões: {}", e)),
            }
        });
    };

    let send_to_composer = move |_| {
        let text = draft.get();
        if text.trim().is_empty() {
            ctx.toast_error("Nada para enviar");
            return;
        }
        ctx.offer_snippet(text);
        ctx.navigate(View::Composer);
    };

    let preview = Signal::derive(move || markdown::to_styled_html(&draft.get()));

    view! {
        <div class="assistant-layout">
            <div class="assistant-input">
                <label class="editor-label">"Achados"</label>
                <textarea
                    class="body-textarea"
                    placeholder="Descreva os achados do exame..."
                    prop:value=move || findings.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        set_findings.set(area.value());
                    }
                />

                <div class="assistant-options">
                    <select
                        class="field-select"
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                            set_method.set(select.value());
                        }
                    >
                        <option value="">"Laudo genérico"</option>
                        <For
                            each=move || catalog.methods().get()
                            key=|m| m.id
                            children=move |m| {
                                let value = m.name.clone();
                                view! { <option value=value>{m.name}</option> }
                            }
                        />
                    </select>

                    <select
                        class="field-select"
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                            set_template_id.set(select.value().parse().unwrap_or(0));
                        }
                    >
                        <option value="0">"Sem modelo de base"</option>
                        <For
                            each=move || catalog.templates().get()
                            key=|t| t.id
                            children=move |t| view! { <option value=t.id.to_string()>{t.title}</option> }
                        />
                    </select>
                </div>

                <div class="editor-actions">
                    <button class="save-btn" disabled=move || busy.get() on:click=generate>
                        {move || if busy.get() { "Gerando..." } else { "Gerar laudo" }}
                    </button>
                    <button on:click=suggest>"Sugestões"</button>
                </div>

                <Show when=move || !suggestions.get().is_empty()>
                    <div class="suggestion-list">
                        <For
                            each=move || suggestions.get()
                            key=|s| s.clone()
                            children=move |suggestion| {
                                let rendered = markdown::to_styled_html_inline(&suggestion);
                                view! {
                                    <button
                                        class="suggestion-btn"
                                        inner_html=rendered
                                        on:click=move |_| set_draft.update(|d| {
                                            if !d.is_empty() && !d.ends_with('\n') {
                                                d.push('\n');
                                            }
                                            d.push_str(&suggestion);
                                        })
                                    ></button>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>

            <div class="assistant-output">
                <div class="label-row">
                    <label class="editor-label">"Rascunho"</label>
                    <button class="use-btn" on:click=send_to_composer>"Enviar ao compositor"</button>
                </div>
                <div class="draft-preview" inner_html=move || preview.get()></div>
                <textarea
                    class="draft-source"
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        set_draft.set(area.value());
                    }
                />
            </div>
        </div>
    }
}
