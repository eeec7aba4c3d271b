//! Phrase CRUD, Querying and Cross-Template Transfer

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::models::{Phrase, SubstitutionPair};

use super::{delete, get_json, post_json, put_json, ApiError};

#[derive(Serialize)]
pub struct PhraseArgs<'a> {
    #[serde(rename = "categoria")]
    pub category: &'a str,
    #[serde(rename = "titulo")]
    pub title: &'a str,
    #[serde(rename = "texto_base")]
    pub base_text: &'a str,
    #[serde(rename = "ancora")]
    pub substitution_anchor: Option<&'a str>,
    #[serde(rename = "substituicoes")]
    pub substitutions: &'a [SubstitutionPair],
    #[serde(rename = "conclusao")]
    pub conclusion: Option<&'a str>,
    #[serde(rename = "modelos")]
    pub template_ids: &'a [u32],
}

/// Bulk operation between two templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferOp {
    #[serde(rename = "copiar")]
    Copy,
    #[serde(rename = "mover")]
    Move,
    #[serde(rename = "duplicar")]
    Duplicate,
}

#[derive(Serialize)]
struct TransferArgs<'a> {
    #[serde(rename = "modelo_origem")]
    source_template: u32,
    #[serde(rename = "modelo_destino")]
    target_template: u32,
    #[serde(rename = "frases")]
    phrase_ids: &'a [u32],
    #[serde(rename = "operacao")]
    op: TransferOp,
}

#[derive(Deserialize)]
pub struct TransferResult {
    #[serde(rename = "afetadas")]
    pub affected: u32,
}

pub async fn list_phrases() -> Result<Vec<Phrase>, ApiError> {
    get_json("/api/frases/").await
}

pub async fn create_phrase(args: &PhraseArgs<'_>) -> Result<Phrase, ApiError> {
    post_json("/api/frases/", serde_json::to_value(args).unwrap_or_default()).await
}

pub async fn update_phrase(id: u32, args: &PhraseArgs<'_>) -> Result<Phrase, ApiError> {
    put_json(
        &format!("/api/frases/{}/", id),
        serde_json::to_value(args).unwrap_or_default(),
    )
    .await
}

pub async fn delete_phrase(id: u32) -> Result<(), ApiError> {
    delete(&format!("/api/frases/{}/", id)).await
}

pub async fn list_categories() -> Result<Vec<String>, ApiError> {
    get_json("/api/frases/categorias/").await
}

pub async fn list_titles(category: &str) -> Result<Vec<String>, ApiError> {
    get_json(&format!(
        "/api/frases/titulos_frases/?categoria={}",
        urlencode(category)
    ))
    .await
}

/// Phrases filtered by category and title, for the composer catalog.
pub async fn search_phrases(category: &str, title: &str) -> Result<Vec<Phrase>, ApiError> {
    get_json(&format!(
        "/api/frases/frases/?categoria={}&titulo={}",
        urlencode(category),
        urlencode(title)
    ))
    .await
}

/// Copy, move or duplicate a set of phrases between two templates.
pub async fn transfer_phrases(
    source_template: u32,
    target_template: u32,
    phrase_ids: &[u32],
    op: TransferOp,
) -> Result<TransferResult, ApiError> {
    let args = TransferArgs {
        source_template,
        target_template,
        phrase_ids,
        op,
    };
    post_json(
        "/api/frases/gerenciar-entre-modelos/",
        serde_json::to_value(&args).unwrap_or_default(),
    )
    .await
}

fn urlencode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::urlencode;

    #[test]
    fn test_urlencode_reserved_and_utf8() {
        assert_eq!(urlencode("abc123"), "abc123");
        assert_eq!(urlencode("tórax geral"), "t%C3%B3rax%20geral");
    }
}
