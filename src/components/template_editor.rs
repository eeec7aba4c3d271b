//! Template Editor View
//!
//! CRUD over report templates: title, method, body text and the optional
//! template-level conclusion.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{self, TemplateArgs};
use crate::context::{AppContext, View};
use crate::models::ReportTemplate;
use crate::store::{
    store_remove_template, store_upsert_template, use_catalog, CatalogStoreFields,
};

#[component]
pub fn TemplateEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let catalog = use_catalog();

    let (editing_id, set_editing_id) = signal(None::<u32>);
    let (title, set_title) = signal(String::new());
    let (method_id, set_method_id) = signal(0u32);
    let (body, set_body) = signal(String::new());
    let (conclusion, set_conclusion) = signal(String::new());

    let load_template = move |template: ReportTemplate| {
        set_editing_id.set(Some(template.id));
        set_title.set(template.title);
        set_method_id.set(template.method_id);
        set_body.set(template.body);
        set_conclusion.set(template.conclusion.unwrap_or_default());
    };

    let clear_form = move || {
        set_editing_id.set(None);
        set_title.set(String::new());
        set_method_id.set(0);
        set_body.set(String::new());
        set_conclusion.set(String::new());
    };

    let save = move |_| {
        let name = title.get().trim().to_string();
        if name.is_empty() {
            ctx.toast_error("Informe o título do modelo");
            return;
        }
        let method = method_id.get();
        if method == 0 {
            ctx.toast_error("Selecione o método");
            return;
        }
        let text = body.get();
        let concl = conclusion.get();
        let id = editing_id.get();

        spawn_local(async move {
            let args = TemplateArgs {
                title: &name,
                method_id: method,
                body: &text,
                conclusion: (!concl.is_empty()).then_some(concl.as_str()),
            };
            let result = match id {
                Some(id) => api::update_template(id, &args).await,
                None => api::create_template(&args).await,
            };
            match result {
                Ok(saved) => {
                    store_upsert_template(&catalog, saved);
                    clear_form();
                }
                Err(e) => ctx.toast_error(format!("Falha ao salvar modelo: {}", e)),
            }
        });
    };

    let remove = move |id: u32| {
        spawn_local(async move {
            match api::delete_template(id).await {
                Ok(()) => {
                    store_remove_template(&catalog, id);
                    clear_form();
                }
                Err(e) => ctx.toast_error(format!("Falha ao excluir modelo: {}", e)),
            }
        });
    };

    let compose_with = move |id: u32| {
        let template = catalog
            .templates()
            .get_untracked()
            .into_iter()
            .find(|t| t.id == id);
        if let Some(template) = template {
            ctx.set_current_template(Some(template));
            ctx.navigate(View::Composer);
        }
    };

    view! {
        <div class="editor-layout">
            <aside class="list-column">
                <button class="new-btn" on:click=move |_| clear_form()>"Novo modelo"</button>
                <For
                    each=move || catalog.templates().get()
                    key=|t| t.id
                    children=move |template| {
                        let name = template.title.clone();
                        view! {
                            <button
                                class="list-item-btn"
                                on:click=move |_| load_template(template.clone())
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
                    <label class="editor-label">"Método"</label>
                    <select
                        class="field-select"
                        prop:value=move || method_id.get().to_string()
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                            set_method_id.set(select.value().parse().unwrap_or(0));
                        }
                    >
                        <option value="0">"—"</option>
                        <For
                            each=move || catalog.methods().get()
                            key=|m| m.id
                            children=move |m| view! { <option value=m.id.to_string()>{m.name}</option> }
                        />
                    </select>
                </div>

                <div class="editor-section grow">
                    <label class="editor-label">"Texto"</label>
                    <textarea
                        class="body-textarea"
                        prop:value=move || body.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                            set_body.set(area.value());
                        }
                    />
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

                <div class="editor-actions">
                    <button class="save-btn" on:click=save>"Salvar"</button>
                    {move || editing_id.get().map(|id| view! {
                        <button class="delete-btn" on:click=move |_| remove(id)>"Excluir"</button>
                        <button class="use-btn" on:click=move |_| compose_with(id)>
                            "Usar no compositor"
                        </button>
                    })}
                </div>
            </main>
        </div>
    }
}
