//! Report Composer
//!
//! The main editing view: pick a template, pull catalogued phrases into the
//! document, fill placeholder tokens through the generated form, dictate,
//! run AI corrections and copy the finished report out in dual format.

use std::ops::Range;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::clipboard;
use crate::context::AppContext;
use crate::insertion::{self, InsertMode, Placement};
use crate::markdown;
use crate::models::{Phrase, ReportTemplate};
use crate::speech::Dictation;
use crate::store::{find_variable_by_title, use_catalog, CatalogStoreFields};
use crate::components::editor_surface::EditorSurface;
use crate::components::insertion_modal::InsertionModal;
use crate::components::variable_form::{build_fields, FormField, VariableForm};

#[component]
pub fn ReportComposer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let catalog = use_catalog();

    let (report, set_report) = signal(String::new());
    let (caret, set_caret) = signal(None::<usize>);
    let (selection, set_selection) = signal(None::<(usize, usize)>);
    let (tracked_conclusion, set_tracked_conclusion) = signal(None::<String>);

    // Pending phrase states: modal open, then (for click mode) one-shot wait
    let (pending_phrase, set_pending_phrase) = signal(None::<Phrase>);
    let (awaiting_click, set_awaiting_click) = signal(None::<Phrase>);

    let (form_fields, set_form_fields) = signal(None::<Vec<FormField>>);

    // Phrase catalog filters
    let (categories, set_categories) = signal(Vec::<String>::new());
    let (category, set_category) = signal(String::new());
    let (titles, set_titles) = signal(Vec::<String>::new());

    let dictation: RwSignal<Option<Dictation>, LocalStorage> = RwSignal::new_local(None);
    let (dictating, set_dictating) = signal(false);

    // Snippet handed over from the AI assistant, consumed once
    Effect::new(move |_| {
        if let Some(snippet) = ctx.take_snippet() {
            set_report.update(|r| *r = insertion::append(r, &snippet));
        }
    });

    // Phrase categories for the catalog column
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::list_categories().await {
                Ok(list) => set_categories.set(list),
                Err(e) => ctx.toast_error(format!("Falha ao carregar categorias: {}", e)),
            }
        });
    });

    // Titles follow the selected category
    Effect::new(move |_| {
        let cat = category.get();
        if cat.is_empty() {
            set_titles.set(Vec::new());
            return;
        }
        spawn_local(async move {
            match api::list_titles(&cat).await {
                Ok(list) => set_titles.set(list),
                Err(e) => ctx.toast_error(format!("Falha ao carregar frases: {}", e)),
            }
        });
    });

    // Restore a template chosen in another view
    Effect::new(move |_| {
        if let Some(template) = ctx.current_template() {
            if report.get_untracked().is_empty() {
                load_template(&template, set_report, set_tracked_conclusion);
            }
        }
    });

    let pick_template = move |template: ReportTemplate| {
        ctx.set_current_template(Some(template.clone()));
        load_template(&template, set_report, set_tracked_conclusion);
    };

    // Apply substitution pairs and conclusion after any successful placement
    let finish_insert = move |new_report: String, phrase: &Phrase| {
        let mut out = insertion::apply_substitutions(&new_report, &phrase.substitutions);
        if let Some(conclusion) = phrase.conclusion.as_deref() {
            let tracked = tracked_conclusion.get_untracked();
            let (merged, now_tracked) =
                insertion::merge_conclusion(&out, tracked.as_deref(), conclusion);
            out = merged;
            set_tracked_conclusion.set(now_tracked);
        }
        set_report.set(out);
    };

    let start_insert = move |phrase: Phrase| {
        let current = report.get_untracked();
        match insertion::place_phrase(
            &current,
            phrase.substitution_anchor.as_deref(),
            &phrase.base_text,
        ) {
            Placement::Anchored(placed) => finish_insert(placed, &phrase),
            Placement::NeedsMode => set_pending_phrase.set(Some(phrase)),
        }
    };

    let pick_mode = move |mode: InsertMode| {
        let Some(phrase) = pending_phrase.get_untracked() else {
            return;
        };
        set_pending_phrase.set(None);
        if mode == InsertMode::ClickPoint {
            set_awaiting_click.set(Some(phrase));
            ctx.toast_info("Clique no texto onde a frase deve entrar");
            return;
        }
        let placed = insertion::apply_mode(
            &report.get_untracked(),
            mode,
            caret.get_untracked(),
            selection.get_untracked().map(|(s, e)| s..e),
            &phrase.base_text,
        );
        finish_insert(placed, &phrase);
    };

    let surface_click = move |offset: usize| {
        // One-shot: only consumes a click while a phrase is waiting for one
        if let Some(phrase) = awaiting_click.get_untracked() {
            set_awaiting_click.set(None);
            let placed = insertion::insert_at(&report.get_untracked(), offset, &phrase.base_text);
            finish_insert(placed, &phrase);
        }
    };

    let insert_by_title = move |title: String| {
        let cat = category.get_untracked();
        spawn_local(async move {
            match api::search_phrases(&cat, &title).await {
                Ok(found) => match found.into_iter().next() {
                    Some(phrase) => start_insert(phrase),
                    None => ctx.toast_error("Frase não encontrada"),
                },
                Err(e) => ctx.toast_error(format!("Falha ao buscar frase: {}", e)),
            }
        });
    };

    let open_fill_form = move |_| {
        let fields = build_fields(&report.get_untracked(), |title| {
            find_variable_by_title(&catalog, title)
        });
        if fields.is_empty() {
            ctx.toast_info("Nenhum campo para preencher");
        } else {
            set_form_fields.set(Some(fields));
        }
    };

    let apply_form = move |answers: Vec<(Range<usize>, Option<String>)>| {
        set_report.update(|r| *r = crate::substitution::replace_ranges(r, &answers));
        set_form_fields.set(None);
    };

    let toggle_dictation = move |_| {
        if dictating.get_untracked() {
            if let Some(active) = dictation.get_untracked() {
                active.stop();
            }
            set_dictating.set(false);
            return;
        }
        let created = Dictation::new(
            move |text| {
                set_report.update(|r| {
                    let offset = caret.get_untracked().unwrap_or(r.len());
                    let spaced = format!("{} ", text);
                    *r = insertion::insert_at(r, offset, &spaced);
                });
            },
            move |error| ctx.toast_error(error),
        );
        match created {
            Ok(session) => match session.start() {
                Ok(()) => {
                    dictation.set(Some(session));
                    set_dictating.set(true);
                }
                Err(e) => ctx.toast_error(e),
            },
            Err(e) => ctx.toast_error(e),
        }
    };

    let correct_selected = move |_| {
        let current = report.get_untracked();
        // The selection may be stale after programmatic rewrites; clamp
        // before slicing, and fall back to the whole document if it
        // collapsed to nothing.
        let range = selection
            .get_untracked()
            .map(|(s, e)| insertion::clamp_range(&current, s..e))
            .filter(|r| !r.is_empty());
        let target = match range.clone() {
            Some(r) => current[r].to_string(),
            None => current.clone(),
        };
        if target.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            match api::correct_text(&target).await {
                Ok(corrected) => {
                    set_report.update(|r| match range {
                        Some(rg) => *r = insertion::replace_range(r, rg, &corrected),
                        None => *r = corrected,
                    });
                    ctx.toast_info("Texto corrigido");
                }
                Err(e) => ctx.toast_error(format!("Falha na correção: {}", e)),
            }
        });
    };

    let copy_report = move |_| {
        let plain = report.get_untracked();
        let html = markdown::to_styled_html(&plain);
        spawn_local(async move {
            match clipboard::copy_dual(&html, &plain).await {
                Ok(()) => ctx.toast_info("Laudo copiado"),
                Err(e) => ctx.toast_error(e),
            }
        });
    };

    let preview = Signal::derive(move || markdown::to_styled_html(&report.get()));

    view! {
        <div class="composer-layout">
            <aside class="catalog-column">
                <div class="catalog-section">
                    <label class="editor-label">"Modelo"</label>
                    <TemplatePicker on_pick=pick_template />
                </div>

                <div class="catalog-section">
                    <label class="editor-label">"Categoria"</label>
                    <select
                        class="field-select"
                        on:change=move |ev| {
                            use wasm_bindgen::JsCast;
                            let target = ev.target().unwrap();
                            let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                            set_category.set(select.value());
                        }
                    >
                        <option value="">"—"</option>
                        <For
                            each=move || categories.get()
                            key=|c| c.clone()
                            children=move |c| {
                                let value = c.clone();
                                view! { <option value=value>{c}</option> }
                            }
                        />
                    </select>
                </div>

                <div class="catalog-section phrase-list">
                    <For
                        each=move || titles.get()
                        key=|t| t.clone()
                        children=move |title| {
                            let value = title.clone();
                            view! {
                                <button
                                    class="phrase-title-btn"
                                    on:click=move |_| insert_by_title(value.clone())
                                >
                                    {title}
                                </button>
                            }
                        }
                    />
                </div>
            </aside>

            <main class="composer-main">
                <div class="composer-toolbar">
                    <button on:click=open_fill_form>"Preencher campos"</button>
                    <button
                        class=move || if dictating.get() { "mic-btn active" } else { "mic-btn" }
                        on:click=toggle_dictation
                    >
                        {move || if dictating.get() { "Parar ditado" } else { "Ditar" }}
                    </button>
                    <button on:click=correct_selected>"Corrigir texto"</button>
                    <button class="copy-btn" on:click=copy_report>"Copiar laudo"</button>
                </div>

                <EditorSurface
                    content=report
                    set_content=set_report
                    set_caret=set_caret
                    set_selection=set_selection
                    preview=preview
                    on_click=surface_click
                />
            </main>

            {move || form_fields.get().map(|fields| view! {
                <VariableForm
                    fields=fields
                    on_apply=apply_form
                    on_cancel=move |_: ()| set_form_fields.set(None)
                />
            })}

            {move || pending_phrase.get().map(|phrase| {
                let title = phrase.title.clone();
                view! {
                    <InsertionModal
                        phrase_title=title
                        on_pick=pick_mode
                        on_cancel=move |_: ()| set_pending_phrase.set(None)
                    />
                }
            })}
        </div>
    }
}

fn load_template(
    template: &ReportTemplate,
    set_report: WriteSignal<String>,
    set_tracked_conclusion: WriteSignal<Option<String>>,
) {
    let mut body = template.body.clone();
    let mut tracked = None;
    if let Some(conclusion) = template.conclusion.as_deref() {
        if !conclusion.is_empty() {
            body = insertion::append(&body, conclusion);
            tracked = Some(conclusion.to_string());
        }
    }
    set_report.set(body);
    set_tracked_conclusion.set(tracked);
}

/// Method filter plus template dropdown over the catalog store.
#[component]
fn TemplatePicker(#[prop(into)] on_pick: Callback<ReportTemplate>) -> impl IntoView {
    let catalog = use_catalog();
    let (method_filter, set_method_filter) = signal(0u32);

    let filtered = move || {
        let templates = catalog.templates().get();
        let method = method_filter.get();
        templates
            .into_iter()
            .filter(|t| method == 0 || t.method_id == method)
            .collect::<Vec<_>>()
    };

    view! {
        <select
            class="field-select"
            on:change=move |ev| {
                use wasm_bindgen::JsCast;
                let target = ev.target().unwrap();
                let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                set_method_filter.set(select.value().parse().unwrap_or(0));
            }
        >
            <option value="0">"Todos os métodos"</option>
            <For
                each=move || catalog.methods().get()
                key=|m| m.id
                children=move |m| view! { <option value=m.id.to_string()>{m.name}</option> }
            />
        </select>

        <div class="template-list">
            <For
                each=filtered
                key=|t| t.id
                children=move |template| {
                    let title = template.title.clone();
                    let picked = template.clone();
                    view! {
                        <button
                            class="template-btn"
                            on:click=move |_| on_pick.run(picked.clone())
                        >
                            {title}
                        </button>
                    }
                }
            />
        </div>
    }
}
