//! Phrase Editor View
//!
//! CRUD over catalogued phrases. The base text is edited through its display
//! form: embedded local-variable JSON is shown as `[LOCAL: ...]` tags and
//! rebound to the stored definitions on save, so hand edits around a tag can
//! never corrupt the JSON. Substitution pairs are ordered and drag-sortable.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use leptos_sortable::{
    apply_reorder, bind_global_mouseup, create_sort_signals, make_on_mousedown,
    make_on_mouseleave, make_on_row_mouseenter,
};

use crate::api::{self, PhraseArgs};
use crate::context::AppContext;
use crate::localvar::{self, Segment};
use crate::models::{ControlKind, LocalVariable, Phrase, SubstitutionPair, VariableValue};
use crate::store::{store_remove_phrase, store_upsert_phrase, use_catalog, CatalogStoreFields};

#[component]
pub fn PhraseEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let catalog = use_catalog();

    let (editing_id, set_editing_id) = signal(None::<u32>);
    let (category, set_category) = signal(String::new());
    let (title, set_title) = signal(String::new());
    // Segments hold the authoritative markers; the buffer is what the user
    // types into and is re-merged against the segments on save.
    let (segments, set_segments) = signal(Vec::<Segment>::new());
    let (buffer, set_buffer) = signal(String::new());
    let (anchor, set_anchor) = signal(String::new());
    let (substitutions, set_substitutions) = signal(Vec::<SubstitutionPair>::new());
    let (conclusion, set_conclusion) = signal(String::new());
    let (template_ids, set_template_ids) = signal(Vec::<u32>::new());
    let (local_builder_open, set_local_builder_open) = signal(false);
    let (filter, set_filter) = signal(String::new());

    let sort = create_sort_signals();
    bind_global_mouseup(sort, move |from, to| {
        set_substitutions.update(|list| apply_reorder(list, from, to));
    });

    let load_phrase = move |phrase: Phrase| {
        let parsed = localvar::parse_segments(&phrase.base_text);
        set_editing_id.set(Some(phrase.id));
        set_category.set(phrase.category);
        set_title.set(phrase.title);
        set_buffer.set(localvar::display_text(&parsed));
        set_segments.set(parsed);
        set_anchor.set(phrase.substitution_anchor.unwrap_or_default());
        set_substitutions.set(phrase.substitutions);
        set_conclusion.set(phrase.conclusion.unwrap_or_default());
        set_template_ids.set(phrase.template_ids);
    };

    let clear_form = move || {
        set_editing_id.set(None);
        set_category.set(String::new());
        set_title.set(String::new());
        set_segments.set(Vec::new());
        set_buffer.set(String::new());
        set_anchor.set(String::new());
        set_substitutions.set(Vec::new());
        set_conclusion.set(String::new());
        set_template_ids.set(Vec::new());
        set_local_builder_open.set(false);
    };

    let add_local = move |def: LocalVariable| {
        let tag = localvar::display_tag(&def);
        let marker = localvar::make_marker(def);
        // Fold the current buffer back into segments first so earlier hand
        // edits survive, then append the new marker at the end.
        let mut merged = localvar::merge_edits(&buffer.get_untracked(), &segments.get_untracked());
        merged.push(marker);
        set_segments.set(merged);
        set_buffer.update(|b| {
            if !b.is_empty() && !b.ends_with(' ') && !b.ends_with('\n') {
                b.push(' ');
            }
            b.push_str(&tag);
        });
        set_local_builder_open.set(false);
    };

    let save = move |_| {
        let cat = category.get().trim().to_string();
        let name = title.get().trim().to_string();
        if cat.is_empty() || name.is_empty() {
            ctx.toast_error("Informe categoria e título da frase");
            return;
        }
        let merged = localvar::merge_edits(&buffer.get(), &segments.get());
        let base_text = localvar::persisted_text(&merged);
        let anchor_text = anchor.get();
        let pairs = substitutions.get();
        let concl = conclusion.get();
        let templates = template_ids.get();
        let id = editing_id.get();

        spawn_local(async move {
            let args = PhraseArgs {
                category: &cat,
                title: &name,
                base_text: &base_text,
                substitution_anchor: (!anchor_text.is_empty()).then_some(anchor_text.as_str()),
                substitutions: &pairs,
                conclusion: (!concl.is_empty()).then_some(concl.as_str()),
                template_ids: &templates,
            };
            let result = match id {
                Some(id) => api::update_phrase(id, &args).await,
                None => api::create_phrase(&args).await,
            };
            match result {
                Ok(saved) => {
                    store_upsert_phrase(&catalog, saved);
                    clear_form();
                }
                Err(e) => ctx.toast_error(format!("Falha ao salvar frase: {}", e)),
            }
        });
    };

    let remove = move |id: u32| {
        spawn_local(async move {
            match api::delete_phrase(id).await {
                Ok(()) => {
                    store_remove_phrase(&catalog, id);
                    clear_form();
                }
                Err(e) => ctx.toast_error(format!("Falha ao excluir frase: {}", e)),
            }
        });
    };

    let filtered = move || {
        let needle = filter.get().to_lowercase();
        catalog
            .phrases()
            .get()
            .into_iter()
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="editor-layout">
            <aside class="list-column">
                <button class="new-btn" on:click=move |_| clear_form()>"Nova frase"</button>
                <input
                    type="text"
                    class="filter-input"
                    placeholder="Filtrar..."
                    prop:value=move || filter.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_filter.set(input.value());
                    }
                />
                <For
                    each=filtered
                    key=|p| p.id
                    children=move |phrase| {
                        let label = format!("{} / {}", phrase.category, phrase.title);
                        view! {
                            <button
                                class="list-item-btn"
                                on:click=move |_| load_phrase(phrase.clone())
                            >
                                {label}
                            </button>
                        }
                    }
                />
            </aside>

            <main class="edit-column">
                <div class="editor-section split">
                    <div>
                        <label class="editor-label">"Categoria"</label>
                        <input
                            type="text"
                            prop:value=move || category.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_category.set(input.value());
                            }
                        />
                    </div>
                    <div>
                        <label class="editor-label">"Título"</label>
                        <input
                            type="text"
                            prop:value=move || title.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_title.set(input.value());
                            }
                        />
                    </div>
                </div>

                <div class="editor-section grow">
                    <div class="label-row">
                        <label class="editor-label">"Texto base"</label>
                        <button
                            class="add-btn"
                            on:click=move |_| set_local_builder_open.set(true)
                        >
                            "+ variável local"
                        </button>
                    </div>
                    <textarea
                        class="body-textarea"
                        prop:value=move || buffer.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                            set_buffer.set(area.value());
                        }
                    />
                </div>

                <div class="editor-section">
                    <label class="editor-label">"Âncora de substituição"</label>
                    <input
                        type="text"
                        placeholder="texto a substituir no laudo, se presente"
                        prop:value=move || anchor.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_anchor.set(input.value());
                        }
                    />
                </div>

                <div class="editor-section" on:mouseleave=make_on_mouseleave(sort)>
                    <label class="editor-label">"Substituições (em ordem; arraste para reordenar)"</label>
                    {move || substitutions.get().into_iter().enumerate().map(|(idx, pair)| {
                        let dragging = move || sort.dragging_read.get() == Some(idx);
                        view! {
                            <div
                                class=move || if dragging() { "value-row dragging" } else { "value-row" }
                                on:mousedown=make_on_mousedown(sort, idx)
                                on:mouseenter=make_on_row_mouseenter(sort, idx)
                            >
                                <input
                                    type="text"
                                    placeholder="Buscar"
                                    prop:value=pair.find.clone()
                                    on:change=move |ev| {
                                        let target = ev.target().unwrap();
                                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                        let text = input.value();
                                        set_substitutions.update(|list| list[idx].find = text);
                                    }
                                />
                                <input
                                    type="text"
                                    placeholder="Substituir por"
                                    prop:value=pair.replace.clone()
                                    on:change=move |ev| {
                                        let target = ev.target().unwrap();
                                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                        let text = input.value();
                                        set_substitutions.update(|list| list[idx].replace = text);
                                    }
                                />
                                <button
                                    class="remove-btn"
                                    on:click=move |_| set_substitutions.update(|list| { list.remove(idx); })
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    }).collect_view()}
                    <button
                        class="add-btn"
                        on:click=move |_| set_substitutions.update(|list| list.push(SubstitutionPair {
                            find: String::new(),
                            replace: String::new(),
                        }))
                    >
                        "+ substituição"
                    </button>
                </div>

                <div class="editor-section">
                    <label class="editor-label">"Conclusão"</label>
                    <textarea
                        class="conclusion-textarea"
                        prop:value=move || conclusion.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                            set_conclusion.set(area.value());
                        }
                    />
                </div>

                <div class="editor-section">
                    <label class="editor-label">"Modelos associados"</label>
                    <div class="option-row">
                        <For
                            each=move || catalog.templates().get()
                            key=|t| t.id
                            children=move |template| {
                                let id = template.id;
                                view! {
                                    <label class="option-label">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || template_ids.get().contains(&id)
                                            on:change=move |_| set_template_ids.update(|ids| {
                                                if let Some(pos) = ids.iter().position(|t| *t == id) {
                                                    ids.remove(pos);
                                                } else {
                                                    ids.push(id);
                                                }
                                            })
                                        />
                                        {template.title.clone()}
                                    </label>
                                }
                            }
                        />
                    </div>
                </div>

                <div class="editor-actions">
                    <button class="save-btn" on:click=save>"Salvar"</button>
                    {move || editing_id.get().map(|id| view! {
                        <button class="delete-btn" on:click=move |_| remove(id)>"Excluir"</button>
                    })}
                </div>
            </main>

            {move || local_builder_open.get().then(|| view! {
                <LocalVariableBuilder
                    on_confirm=add_local
                    on_cancel=move |_: ()| set_local_builder_open.set(false)
                />
            })}
        </div>
    }
}

const LOCAL_CONTROLS: &[(ControlKind, &str)] = &[
    (ControlKind::SingleSelect, "Seleção"),
    (ControlKind::RadioGroup, "Opção"),
    (ControlKind::CheckboxGroup, "Caixas"),
    (ControlKind::MultiSelect, "Múltipla"),
];

/// Modal form producing a complete local-variable definition.
#[component]
fn LocalVariableBuilder(
    #[prop(into)] on_confirm: Callback<LocalVariable>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (title, set_title) = signal(String::new());
    let (label, set_label) = signal(String::new());
    let (control, set_control) = signal(ControlKind::SingleSelect);
    let (values, set_values) = signal(Vec::<VariableValue>::new());
    let (delimiter, set_delimiter) = signal(String::new());
    let (last_delimiter, set_last_delimiter) = signal(String::new());

    let confirm = move |_| {
        let name = title.get().trim().to_string();
        if name.is_empty() {
            ctx.toast_error("Informe o título da variável local");
            return;
        }
        let tag = label.get().trim().to_string();
        let delim = delimiter.get();
        let last = last_delimiter.get();
        on_confirm.run(LocalVariable {
            tipo: "variavelLocal".to_string(),
            controle: control.get(),
            titulo: name,
            valores: values.get(),
            label: (!tag.is_empty()).then_some(tag),
            delimitador: (!delim.is_empty()).then_some(delim),
            ultimoDelimitador: (!last.is_empty()).then_some(last),
        });
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal local-builder">
                <div class="modal-header">
                    <span>"Nova variável local"</span>
                    <button class="close-btn" on:click=move |_| on_cancel.run(())>"×"</button>
                </div>

                <div class="editor-section split">
                    <div>
                        <label class="editor-label">"Título"</label>
                        <input
                            type="text"
                            prop:value=move || title.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_title.set(input.value());
                            }
                        />
                    </div>
                    <div>
                        <label class="editor-label">"Etiqueta (opcional)"</label>
                        <input
                            type="text"
                            prop:value=move || label.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_label.set(input.value());
                            }
                        />
                    </div>
                </div>

                <div class="editor-section">
                    <label class="editor-label">"Controle"</label>
                    <div class="type-selector-row">
                        {LOCAL_CONTROLS.iter().map(|(kind, text)| {
                            let kind = *kind;
                            view! {
                                <button
                                    type="button"
                                    class=move || if control.get() == kind {
                                        "type-btn small active"
                                    } else {
                                        "type-btn small"
                                    }
                                    on:click=move |_| set_control.set(kind)
                                >
                                    {*text}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                </div>

                <div class="editor-section">
                    <label class="editor-label">"Valores"</label>
                    {move || values.get().into_iter().enumerate().map(|(idx, value)| view! {
                        <div class="value-row">
                            <input
                                type="text"
                                placeholder="Descrição"
                                prop:value=value.description.clone()
                                on:change=move |ev| {
                                    let target = ev.target().unwrap();
                                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                    let text = input.value();
                                    set_values.update(|list| list[idx].description = text);
                                }
                            />
                            <input
                                type="text"
                                placeholder="Valor"
                                prop:value=value.value.clone()
                                on:change=move |ev| {
                                    let target = ev.target().unwrap();
                                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                    let text = input.value();
                                    set_values.update(|list| list[idx].value = text);
                                }
                            />
                            <button
                                class="remove-btn"
                                on:click=move |_| set_values.update(|list| { list.remove(idx); })
                            >
                                "×"
                            </button>
                        </div>
                    }).collect_view()}
                    <button
                        class="add-btn"
                        on:click=move |_| set_values.update(|list| list.push(VariableValue {
                            description: String::new(),
                            value: String::new(),
                        }))
                    >
                        "+ valor"
                    </button>
                </div>

                <div class="editor-section delimiter-row">
                    <div>
                        <label class="editor-label">"Delimitador"</label>
                        <input
                            type="text"
                            placeholder=", "
                            prop:value=move || delimiter.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_delimiter.set(input.value());
                            }
                        />
                    </div>
                    <div>
                        <label class="editor-label">"Último delimitador"</label>
                        <input
                            type="text"
                            placeholder=" e "
                            prop:value=move || last_delimiter.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_last_delimiter.set(input.value());
                            }
                        />
                    </div>
                </div>

                <div class="editor-actions">
                    <button class="save-btn" on:click=confirm>"Inserir no texto"</button>
                </div>
            </div>
        </div>
    }
}
