//! Laudo Frontend App
//!
//! Top-level component: session gate, view routing, catalog loading and the
//! shared context values every view consumes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    AiAssistant, LoginView, PhraseEditor, PhraseTransfer, ReportComposer, TemplateEditor,
    ToastTray, VariableEditor,
};
use crate::context::{AppContext, Toast, View};
use crate::session;
use crate::store::{Catalog, CatalogStore, CatalogStoreFields};

const NAV_ITEMS: &[(View, &str)] = &[
    (View::Composer, "Compositor"),
    (View::Templates, "Modelos"),
    (View::Phrases, "Frases"),
    (View::Variables, "Variáveis"),
    (View::Assistant, "Assistente"),
    (View::Transfer, "Transferência"),
];

#[component]
pub fn App() -> impl IntoView {
    let initial = if session::is_logged_in() {
        View::Composer
    } else {
        View::Login
    };
    let (view, set_view) = signal(initial);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (toasts, set_toasts) = signal(Vec::<Toast>::new());

    let ctx = AppContext::new(
        (view, set_view),
        (reload_trigger, set_reload_trigger),
        (toasts, set_toasts),
    );
    provide_context(ctx);

    let catalog = CatalogStore::new(Catalog::default());
    provide_context(catalog);

    let (username, set_username) = signal(String::new());

    // Resolve the profile once a session is active; also validates the
    // stored tokens right after startup.
    Effect::new(move |_| {
        if view.get() == View::Login {
            return;
        }
        if !username.get_untracked().is_empty() {
            return;
        }
        spawn_local(async move {
            if let Ok(profile) = api::me().await {
                set_username.set(profile.username);
            }
        });
    });

    // Load the full catalog whenever a view asks for a reload. Nothing to
    // load while the login screen is up.
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        if view.get() == View::Login {
            return;
        }
        spawn_local(async move {
            match api::list_methods().await {
                Ok(loaded) => catalog.methods().set(loaded),
                Err(e) => ctx.toast_error(format!("Falha ao carregar métodos: {}", e)),
            }
            match api::list_templates().await {
                Ok(loaded) => catalog.templates().set(loaded),
                Err(e) => ctx.toast_error(format!("Falha ao carregar modelos: {}", e)),
            }
            match api::list_variables().await {
                Ok(loaded) => catalog.variables().set(loaded),
                Err(e) => ctx.toast_error(format!("Falha ao carregar variáveis: {}", e)),
            }
            match api::list_phrases().await {
                Ok(loaded) => catalog.phrases().set(loaded),
                Err(e) => ctx.toast_error(format!("Falha ao carregar frases: {}", e)),
            }
        });
    });

    let logout = move |_| {
        session::clear_tokens();
        ctx.set_current_template(None);
        set_username.set(String::new());
        ctx.navigate(View::Login);
    };

    view! {
        <div class="app-layout">
            <Show when=move || view.get() != View::Login>
                <nav class="app-nav">
                    <span class="app-title">"Laudos"</span>
                    {NAV_ITEMS.iter().map(|(target, label)| {
                        let target = *target;
                        view! {
                            <button
                                class=move || if view.get() == target {
                                    "nav-btn active"
                                } else {
                                    "nav-btn"
                                }
                                on:click=move |_| ctx.navigate(target)
                            >
                                {*label}
                            </button>
                        }
                    }).collect_view()}
                    <span class="nav-user">{move || username.get()}</span>
                    <button class="nav-btn logout" on:click=logout>"Sair"</button>
                </nav>
            </Show>

            <div class="app-body">
                {move || match view.get() {
                    View::Login => view! { <LoginView /> }.into_any(),
                    View::Composer => view! { <ReportComposer /> }.into_any(),
                    View::Templates => view! { <TemplateEditor /> }.into_any(),
                    View::Phrases => view! { <PhraseEditor /> }.into_any(),
                    View::Variables => view! { <VariableEditor /> }.into_any(),
                    View::Assistant => view! { <AiAssistant /> }.into_any(),
                    View::Transfer => view! { <PhraseTransfer /> }.into_any(),
                }}
            </div>

            <ToastTray />
        </div>
    }
}
