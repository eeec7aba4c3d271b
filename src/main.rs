//! Laudo Frontend Entry Point

mod api;
mod app;
mod clipboard;
mod components;
mod config;
mod context;
mod insertion;
mod localvar;
mod markdown;
mod models;
mod plural;
mod session;
mod speech;
mod store;
mod substitution;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
