//! AI Text Endpoints
//!
//! Generation and correction are delegated to the backend's AI service;
//! responses come back as Markdown and are converted to styled HTML by the
//! caller before touching the editor.

use serde::Deserialize;
use serde_json::json;

use super::{post_json, ApiError};

#[derive(Deserialize)]
struct AiResponse {
    #[serde(rename = "texto")]
    text: String,
}

/// Free-form report generation from clinical findings.
pub async fn generate_report(findings: &str) -> Result<String, ApiError> {
    let resp: AiResponse =
        post_json("/api/ia/gerar-laudo/", json!({ "achados": findings })).await?;
    Ok(resp.text)
}

/// Short continuation suggestions for the text around the caret.
pub async fn generate_suggestions(context: &str) -> Result<Vec<String>, ApiError> {
    #[derive(Deserialize)]
    struct Suggestions {
        #[serde(rename = "sugestoes")]
        suggestions: Vec<String>,
    }
    let resp: Suggestions =
        post_json("/api/ia/gerar-sugestoes/", json!({ "contexto": context })).await?;
    Ok(resp.suggestions)
}

/// Radiology-specific generation, taking the method and template into account.
pub async fn generate_radiology_report(
    method: &str,
    findings: &str,
    template_body: Option<&str>,
) -> Result<String, ApiError> {
    let resp: AiResponse = post_json(
        "/api/ia/gerar_laudo_radiologia/",
        json!({
            "metodo": method,
            "achados": findings,
            "modelo": template_body,
        }),
    )
    .await?;
    Ok(resp.text)
}

/// Grammar/style correction of an existing passage.
pub async fn correct_text(text: &str) -> Result<String, ApiError> {
    let resp: AiResponse = post_json("/api/ia/corrigir_texto/", json!({ "texto": text })).await?;
    Ok(resp.text)
}
