//! Frontend Models
//!
//! Data structures matching the backend REST entities. Wire field names are
//! Portuguese (schema owned by the remote API), mapped via serde renames.

use serde::{Deserialize, Serialize};

/// Report method ("método"), used to filter templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub id: u32,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Report template ("modelo de laudo")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: u32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "metodo")]
    pub method_id: u32,
    /// Rich text body, may contain `{Variable}` and `{opt1//opt2}` tokens
    #[serde(rename = "texto")]
    pub body: String,
    /// Template-level conclusion, tracked by the composer once inserted
    #[serde(rename = "conclusao", default)]
    pub conclusion: Option<String>,
}

/// One ordered find/replace pair applied after a phrase is inserted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionPair {
    #[serde(rename = "buscar")]
    pub find: String,
    #[serde(rename = "substituir")]
    pub replace: String,
}

/// Reusable phrase ("frase")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    pub id: u32,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "titulo")]
    pub title: String,
    /// Base text with tokens and optional embedded local-variable JSON
    #[serde(rename = "texto_base")]
    pub base_text: String,
    /// If present and found in the report, the base text replaces it in place
    #[serde(rename = "ancora", default)]
    pub substitution_anchor: Option<String>,
    /// Ordered; applied sequentially over the whole document
    #[serde(rename = "substituicoes", default)]
    pub substitutions: Vec<SubstitutionPair>,
    #[serde(rename = "conclusao", default)]
    pub conclusion: Option<String>,
    #[serde(rename = "modelos", default)]
    pub template_ids: Vec<u32>,
}

/// Form control kind for a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    #[serde(rename = "select")]
    SingleSelect,
    #[serde(rename = "radio")]
    RadioGroup,
    #[serde(rename = "checkbox")]
    CheckboxGroup,
    #[serde(rename = "multiselect")]
    MultiSelect,
}

impl ControlKind {
    /// Whether the control allows more than one selected value
    pub fn is_multi(self) -> bool {
        matches!(self, ControlKind::CheckboxGroup | ControlKind::MultiSelect)
    }
}

/// One selectable value of a variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableValue {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub value: String,
}

/// Server-side variable ("variável"), referenced from text as `{Title}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: u32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "controle")]
    pub control: ControlKind,
    /// Ordered; this is what the editor's drag reordering manipulates
    #[serde(rename = "valores")]
    pub values: Vec<VariableValue>,
    #[serde(rename = "delimitador", default)]
    pub delimiter: Option<String>,
    #[serde(rename = "ultimoDelimitador", default)]
    pub last_delimiter: Option<String>,
}

/// Local variable embedded verbatim inside a phrase's text as one-line JSON.
/// Wire field names are fixed by convention and must round-trip exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct LocalVariable {
    pub tipo: String,
    pub controle: ControlKind,
    pub titulo: String,
    pub valores: Vec<VariableValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimitador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultimoDelimitador: Option<String>,
}

impl LocalVariable {
    /// Tag text shown to the user instead of the raw JSON
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.titulo)
    }
}

/// Access/refresh token pair returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}
