//! Variable Editor View
//!
//! CRUD over server-side variables: title, control kind, the ordered value
//! list (drag to reorder) and the join delimiters.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use leptos_sortable::{
    apply_reorder, bind_global_mouseup, create_sort_signals, make_on_mousedown,
    make_on_mouseleave, make_on_row_mouseenter,
};

use crate::api::{self, VariableArgs};
use crate::context::AppContext;
use crate::models::{ControlKind, Variable, VariableValue};
use crate::store::{
    store_remove_variable, store_upsert_variable, use_catalog, CatalogStoreFields,
};

const CONTROL_KINDS: &[(ControlKind, &str)] = &[
    (ControlKind::SingleSelect, "Seleção única"),
    (ControlKind::RadioGroup, "Botões de opção"),
    (ControlKind::CheckboxGroup, "Caixas de seleção"),
    (ControlKind::MultiSelect, "Seleção múltipla"),
];

#[component]
pub fn VariableEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let catalog = use_catalog();

    // None = creating a new variable
    let (editing_id, set_editing_id) = signal(None::<u32>);
    let (title, set_title) = signal(String::new());
    let (control, set_control) = signal(ControlKind::SingleSelect);
    let (values, set_values) = signal(Vec::<VariableValue>::new());
    let (delimiter, set_delimiter) = signal(String::new());
    let (last_delimiter, set_last_delimiter) = signal(String::new());

    let sort = create_sort_signals();
    bind_global_mouseup(sort, move |from, to| {
        set_values.update(|list| apply_reorder(list, from, to));
    });

    let load_variable = move |variable: Variable| {
        set_editing_id.set(Some(variable.id));
        set_title.set(variable.title);
        set_control.set(variable.control);
        set_values.set(variable.values);
        set_delimiter.set(variable.delimiter.unwrap_or_default());
        set_last_delimiter.set(variable.last_delimiter.unwrap_or_default());
    };

    let clear_form = move || {
        set_editing_id.set(None);
        set_title.set(String::new());
        set_control.set(ControlKind::SingleSelect);
        set_values.set(Vec::new());
        set_delimiter.set(String::new());
        set_last_delimiter.set(String::new());
    };

    let save = move |_| {
        let name = title.get().trim().to_string();
        if name.is_empty() {
            ctx.toast_error("Informe o título da variável");
            return;
        }
        let value_list = values.get();
        // Value keys must be unique per variable
        let mut seen = std::collections::HashSet::new();
        if !value_list.iter().all(|v| seen.insert(v.value.clone())) {
            ctx.toast_error("Valores duplicados na variável");
            return;
        }
        let kind = control.get();
        let delim = delimiter.get();
        let last = last_delimiter.get();
        let id = editing_id.get();

        spawn_local(async move {
            let args = VariableArgs {
                title: &name,
                control: kind,
                values: &value_list,
                delimiter: (!delim.is_empty()).then_some(delim.as_str()),
                last_delimiter: (!last.is_empty()).then_some(last.as_str()),
            };
            let result = match id {
                Some(id) => api::update_variable(id, &args).await,
                None => api::create_variable(&args).await,
            };
            match result {
                Ok(saved) => {
                    store_upsert_variable(&catalog, saved);
                    clear_form();
                }
                Err(e) => ctx.toast_error(format!("Falha ao salvar variável: {}", e)),
            }
        });
    };

    let remove = move |id: u32| {
        spawn_local(async move {
            match api::delete_variable(id).await {
                Ok(()) => {
                    store_remove_variable(&catalog, id);
                    clear_form();
                }
                Err(e) => ctx.toast_error(format!("Falha ao excluir variável: {}", e)),
            }
        });
    };

    view! {
        <div class="editor-layout">
            <aside class="list-column">
                <button class="new-btn" on:click=move |_| clear_form()>"Nova variável"</button>
                <For
                    each=move || catalog.variables().get()
                    key=|v| v.id
                    children=move |variable| {
                        let name = variable.title.clone();
                        view! {
                            <button
                                class="list-item-btn"
                                on:click=move |_| load_variable(variable.clone())
                            >
                                {name}
                            </button>
                        }
                    }
                />
            </aside>

            <main class="edit-column">
                <div class="editor-section">
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

                <div class="editor-section">
                    <label class="editor-label">"Controle"</label>
                    <div class="type-selector-row">
                        {CONTROL_KINDS.iter().map(|(kind, label)| {
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
                                    {*label}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                </div>

                <div class="editor-section" on:mouseleave=make_on_mouseleave(sort)>
                    <label class="editor-label">"Valores (arraste para reordenar)"</label>
                    {move || values.get().into_iter().enumerate().map(|(idx, value)| {
                        let dragging = move || sort.dragging_read.get() == Some(idx);
                        view! {
                            <div
                                class=move || if dragging() { "value-row dragging" } else { "value-row" }
                                on:mousedown=make_on_mousedown(sort, idx)
                                on:mouseenter=make_on_row_mouseenter(sort, idx)
                            >
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
                        }
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
                    <button class="save-btn" on:click=save>"Salvar"</button>
                    {move || editing_id.get().map(|id| view! {
                        <button class="delete-btn" on:click=move |_| remove(id)>"Excluir"</button>
                    })}
                </div>
            </main>
        </div>
    }
}
