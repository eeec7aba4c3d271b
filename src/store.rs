//! Catalog Store
//!
//! Server catalog data (methods, templates, variables, phrases) with
//! field-level reactivity via reactive_stores.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Method, Phrase, ReportTemplate, Variable};

/// Catalog state shared by the editor views
#[derive(Clone, Debug, Default, Store)]
pub struct Catalog {
    pub methods: Vec<Method>,
    pub templates: Vec<ReportTemplate>,
    pub variables: Vec<Variable>,
    pub phrases: Vec<Phrase>,
}

pub type CatalogStore = Store<Catalog>;

pub fn use_catalog() -> CatalogStore {
    expect_context::<CatalogStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_upsert_template(store: &CatalogStore, template: ReportTemplate) {
    let binding = store.templates();
    let mut templates = binding.write();
    match templates.iter_mut().find(|t| t.id == template.id) {
        Some(existing) => *existing = template,
        None => templates.push(template),
    }
}

pub fn store_remove_template(store: &CatalogStore, id: u32) {
    store.templates().write().retain(|t| t.id != id);
}

pub fn store_upsert_variable(store: &CatalogStore, variable: Variable) {
    let binding = store.variables();
    let mut variables = binding.write();
    match variables.iter_mut().find(|v| v.id == variable.id) {
        Some(existing) => *existing = variable,
        None => variables.push(variable),
    }
}

pub fn store_remove_variable(store: &CatalogStore, id: u32) {
    store.variables().write().retain(|v| v.id != id);
}

pub fn store_upsert_phrase(store: &CatalogStore, phrase: Phrase) {
    let binding = store.phrases();
    let mut phrases = binding.write();
    match phrases.iter_mut().find(|p| p.id == phrase.id) {
        Some(existing) => *existing = phrase,
        None => phrases.push(phrase),
    }
}

pub fn store_remove_phrase(store: &CatalogStore, id: u32) {
    store.phrases().write().retain(|p| p.id != id);
}

/// Find a variable by exact title, the lookup the token resolver uses.
pub fn find_variable_by_title(store: &CatalogStore, title: &str) -> Option<Variable> {
    store
        .variables()
        .read()
        .iter()
        .find(|v| v.title == title)
        .cloned()
}
