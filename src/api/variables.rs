//! Variable CRUD

use serde::Serialize;

use crate::models::{ControlKind, Variable, VariableValue};

use super::{delete, get_json, post_json, put_json, ApiError};

#[derive(Serialize)]
pub struct VariableArgs<'a> {
    #[serde(rename = "titulo")]
    pub title: &'a str,
    #[serde(rename = "controle")]
    pub control: ControlKind,
    #[serde(rename = "valores")]
    pub values: &'a [VariableValue],
    #[serde(rename = "delimitador")]
    pub delimiter: Option<&'a str>,
    #[serde(rename = "ultimoDelimitador")]
    pub last_delimiter: Option<&'a str>,
}

pub async fn list_variables() -> Result<Vec<Variable>, ApiError> {
    get_json("/api/variaveis/").await
}

pub async fn create_variable(args: &VariableArgs<'_>) -> Result<Variable, ApiError> {
    post_json("/api/variaveis/", serde_json::to_value(args).unwrap_or_default()).await
}

pub async fn update_variable(id: u32, args: &VariableArgs<'_>) -> Result<Variable, ApiError> {
    put_json(
        &format!("/api/variaveis/{}/", id),
        serde_json::to_value(args).unwrap_or_default(),
    )
    .await
}

pub async fn delete_variable(id: u32) -> Result<(), ApiError> {
    delete(&format!("/api/variaveis/{}/", id)).await
}
