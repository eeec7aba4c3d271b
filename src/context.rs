//! Application Context
//!
//! View routing, the notification queue and typed cross-view handoff,
//! provided via the Leptos context API. The handoff values replace the
//! localStorage key/value bus the workflow historically relied on: the
//! current template travels as a typed signal, and one-shot snippets are
//! consumed with `take`.

use leptos::prelude::*;

use crate::models::ReportTemplate;

/// Top-level views of the app
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Composer,
    Templates,
    Phrases,
    Variables,
    Assistant,
    Transfer,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub view: ReadSignal<View>,
    set_view: WriteSignal<View>,
    /// Trigger to reload catalog data - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload catalog data - write
    set_reload_trigger: WriteSignal<u32>,
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    toast_seq: RwSignal<u32>,
    /// Template currently selected for composing / phrase transfer
    current_template: RwSignal<Option<ReportTemplate>>,
    /// One-shot text snippet handed to the next view (consumed on read)
    snippet: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        view: (ReadSignal<View>, WriteSignal<View>),
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        toasts: (ReadSignal<Vec<Toast>>, WriteSignal<Vec<Toast>>),
    ) -> Self {
        Self {
            view: view.0,
            set_view: view.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toasts: toasts.0,
            set_toasts: toasts.1,
            toast_seq: RwSignal::new(0),
            current_template: RwSignal::new(None),
            snippet: RwSignal::new(None),
        }
    }

    pub fn navigate(&self, view: View) {
        self.set_view.set(view);
    }

    /// Trigger a reload of catalog data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Error, message.into());
    }

    pub fn toast_info(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Info, message.into());
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.toast_seq.get_untracked() + 1;
        self.toast_seq.set(id);
        if let ToastKind::Error = kind {
            web_sys::console::error_1(&message.clone().into());
        }
        self.set_toasts.update(|list| list.push(Toast { id, kind, message }));

        // Auto-dismiss
        let set_toasts = self.set_toasts;
        gloo_timers::callback::Timeout::new(5000, move || {
            set_toasts.update(|list| list.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn dismiss_toast(&self, id: u32) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }

    pub fn set_current_template(&self, template: Option<ReportTemplate>) {
        self.current_template.set(template);
    }

    pub fn current_template(&self) -> Option<ReportTemplate> {
        self.current_template.get()
    }

    /// Hand a snippet to the next view
    pub fn offer_snippet(&self, text: String) {
        self.snippet.set(Some(text));
    }

    /// One-shot consumption; the value is cleared on read
    pub fn take_snippet(&self) -> Option<String> {
        self.snippet.try_update(|s| s.take()).flatten()
    }
}
