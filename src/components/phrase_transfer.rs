//! Phrase Transfer View
//!
//! Bulk copy / move / duplicate of phrases between two templates.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{self, TransferOp};
use crate::context::AppContext;
use crate::models::Phrase;
use crate::store::{use_catalog, CatalogStoreFields};

const OPS: &[(TransferOp, &str)] = &[
    (TransferOp::Copy, "Copiar"),
    (TransferOp::Move, "Mover"),
    (TransferOp::Duplicate, "Duplicar"),
];

#[component]
pub fn PhraseTransfer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let catalog = use_catalog();

    let (source, set_source) = signal(0u32);
    let (target, set_target) = signal(0u32);
    let (selected, set_selected) = signal(Vec::<u32>::new());
    let (op, set_op) = signal(TransferOp::Copy);
    let (busy, set_busy) = signal(false);

    // Phrases associated with the source template
    let source_phrases = move || {
        let src = source.get();
        if src == 0 {
            return Vec::new();
        }
        catalog
            .phrases()
            .get()
            .into_iter()
            .filter(|p: &Phrase| p.template_ids.contains(&src))
            .collect::<Vec<_>>()
    };

    let toggle = move |id: u32| {
        set_selected.update(|ids| {
            if let Some(pos) = ids.iter().position(|p| *p == id) {
                ids.remove(pos);
            } else {
                ids.push(id);
            }
        });
    };

    let run_transfer = move |_| {
        let src = source.get();
        let dst = target.get();
        let ids = selected.get();
        if src == 0 || dst == 0 {
            ctx.toast_error("Selecione os modelos de origem e destino");
            return;
        }
        if src == dst {
            ctx.toast_error("Origem e destino devem ser diferentes");
            return;
        }
        if ids.is_empty() {
            ctx.toast_error("Selecione pelo menos uma frase");
            return;
        }
        let chosen_op = op.get();
        set_busy.set(true);
        spawn_local(async move {
            match api::transfer_phrases(src, dst, &ids, chosen_op).await {
                Ok(result) => {
                    ctx.toast_info(format!("{} frase(s) processada(s)", result.affected));
                    set_selected.set(Vec::new());
                    ctx.reload();
                }
                Err(e) => ctx.toast_error(format!("Falha na transferência: {}", e)),
            }
            set_busy.set(false);
        });
    };

    let template_select = move |set: WriteSignal<u32>| {
        view! {
            <select
                class="field-select"
                on:change=move |ev| {
                    let target = ev.target().unwrap();
                    let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                    set.set(select.value().parse().unwrap_or(0));
                }
            >
                <option value="0">"—"</option>
                <For
                    each=move || catalog.templates().get()
                    key=|t| t.id
                    children=move |t| view! { <option value=t.id.to_string()>{t.title}</option> }
                />
            </select>
        }
    };

    view! {
        <div class="transfer-layout">
            <div class="transfer-pickers">
                <div>
                    <label class="editor-label">"Modelo de origem"</label>
                    {template_select(set_source)}
                </div>
                <div>
                    <label class="editor-label">"Modelo de destino"</label>
                    {template_select(set_target)}
                </div>
                <div>
                    <label class="editor-label">"Operação"</label>
                    <div class="type-selector-row">
                        {OPS.iter().map(|(kind, label)| {
                            let kind = *kind;
                            view! {
                                <button
                                    type="button"
                                    class=move || if op.get() == kind {
                                        "type-btn small active"
                                    } else {
                                        "type-btn small"
                                    }
                                    on:click=move |_| set_op.set(kind)
                                >
                                    {*label}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                </div>
            </div>

            <div class="transfer-list">
                <label class="editor-label">"Frases do modelo de origem"</label>
                <For
                    each=source_phrases
                    key=|p| p.id
                    children=move |phrase| {
                        let id = phrase.id;
                        let label = format!("{} / {}", phrase.category, phrase.title);
                        view! {
                            <label class="option-label">
                                <input
                                    type="checkbox"
                                    prop:checked=move || selected.get().contains(&id)
                                    on:change=move |_| toggle(id)
                                />
                                {label}
                            </label>
                        }
                    }
                />
            </div>

            <div class="editor-actions">
                <button class="save-btn" disabled=move || busy.get() on:click=run_transfer>
                    {move || if busy.get() { "Processando..." } else { "Executar" }}
                </button>
            </div>
        </div>
    }
}
