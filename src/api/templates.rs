//! Report Template CRUD

use serde::Serialize;

use crate::models::ReportTemplate;

use super::{delete, get_json, post_json, put_json, ApiError};

#[derive(Serialize)]
pub struct TemplateArgs<'a> {
    #[serde(rename = "titulo")]
    pub title: &'a str,
    #[serde(rename = "metodo")]
    pub method_id: u32,
    #[serde(rename = "texto")]
    pub body: &'a str,
    #[serde(rename = "conclusao")]
    pub conclusion: Option<&'a str>,
}

pub async fn list_templates() -> Result<Vec<ReportTemplate>, ApiError> {
    get_json("/api/modelo_laudo/").await
}

pub async fn create_template(args: &TemplateArgs<'_>) -> Result<ReportTemplate, ApiError> {
    post_json("/api/modelo_laudo/", serde_json::to_value(args).unwrap_or_default()).await
}

pub async fn update_template(id: u32, args: &TemplateArgs<'_>) -> Result<ReportTemplate, ApiError> {
    put_json(
        &format!("/api/modelo_laudo/{}/", id),
        serde_json::to_value(args).unwrap_or_default(),
    )
    .await
}

pub async fn delete_template(id: u32) -> Result<(), ApiError> {
    delete(&format!("/api/modelo_laudo/{}/", id)).await
}
