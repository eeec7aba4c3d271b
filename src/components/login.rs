//! Login / Register View

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::context::{AppContext, View};

#[component]
pub fn LoginView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (registering, set_registering) = signal(false);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let user = username.get().trim().to_string();
        let pass = password.get();
        let mail = email.get().trim().to_string();
        if user.is_empty() || pass.is_empty() {
            ctx.toast_error("Preencha usuário e senha");
            return;
        }
        if registering.get() && mail.is_empty() {
            ctx.toast_error("Preencha o e-mail");
            return;
        }
        let is_register = registering.get();
        set_busy.set(true);
        spawn_local(async move {
            let result = if is_register {
                api::register(&user, &mail, &pass).await
            } else {
                api::login(&user, &pass).await
            };
            set_busy.set(false);
            match result {
                Ok(_) => ctx.navigate(View::Composer),
                Err(e) => ctx.toast_error(format!("Falha ao entrar: {}", e)),
            }
        });
    };

    view! {
        <div class="login-view">
            <form class="login-form" on:submit=submit>
                <h1>"Laudos"</h1>
                <input
                    type="text"
                    placeholder="Usuário"
                    prop:value=move || username.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_username.set(input.value());
                    }
                />
                <Show when=move || registering.get()>
                    <input
                        type="email"
                        placeholder="E-mail"
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_email.set(input.value());
                        }
                    />
                </Show>
                <input
                    type="password"
                    placeholder="Senha"
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_password.set(input.value());
                    }
                />
                <button type="submit" disabled=move || busy.get()>
                    {move || if registering.get() { "Cadastrar" } else { "Entrar" }}
                </button>
                <button
                    type="button"
                    class="link-btn"
                    on:click=move |_| set_registering.update(|r| *r = !*r)
                >
                    {move || if registering.get() {
                        "Já tenho conta"
                    } else {
                        "Criar nova conta"
                    }}
                </button>
            </form>
        </div>
    }
}
