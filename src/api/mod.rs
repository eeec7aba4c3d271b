//! REST API Wrappers
//!
//! Thin async wrappers over the backend, organized by domain. Every
//! authenticated call shares one policy: a 401 triggers exactly one token
//! refresh and retry; if the refresh fails, tokens are cleared and the app
//! reloads into the login view. Nothing else is retried automatically.

mod ai;
mod auth;
mod methods;
mod phrases;
mod templates;
mod variables;

pub use ai::*;
pub use auth::*;
pub use methods::*;
pub use phrases::*;
pub use templates::*;
pub use variables::*;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::{config, session};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("falha de rede: {0}")]
    Network(String),
    #[error("erro HTTP {0}")]
    Http(u16),
    #[error("sessão expirada")]
    Unauthorized,
    #[error("resposta inválida: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// The 401 policy: retry only once, and only for a 401.
pub(crate) fn should_retry(status: u16, already_retried: bool) -> bool {
    status == 401 && !already_retried
}

async fn send(
    verb: Verb,
    path: &str,
    body: Option<&Value>,
    bearer: Option<&str>,
) -> Result<reqwest::Response, ApiError> {
    let url = format!("{}{}", config::api_base(), path);
    let client = reqwest::Client::new();
    let mut req = match verb {
        Verb::Get => client.get(&url),
        Verb::Post => client.post(&url),
        Verb::Put => client.put(&url),
        Verb::Delete => client.delete(&url),
    };
    if let Some(token) = bearer {
        req = req.bearer_auth(token);
    }
    if let Some(body) = body {
        req = req.json(body);
    }
    req.send().await.map_err(|e| ApiError::Network(e.to_string()))
}

/// Authenticated request with the single refresh-then-retry path.
async fn authed(verb: Verb, path: &str, body: Option<Value>) -> Result<reqwest::Response, ApiError> {
    let mut retried = false;
    loop {
        let access = session::load_tokens().map(|t| t.access);
        let resp = send(verb, path, body.as_ref(), access.as_deref()).await?;
        let status = resp.status().as_u16();

        if should_retry(status, retried) {
            retried = true;
            if auth::try_refresh().await {
                continue;
            }
            session::clear_tokens();
            force_relogin();
            return Err(ApiError::Unauthorized);
        }
        if status == 401 {
            session::clear_tokens();
            force_relogin();
            return Err(ApiError::Unauthorized);
        }
        if !resp.status().is_success() {
            return Err(ApiError::Http(status));
        }
        return Ok(resp);
    }
}

fn force_relogin() {
    if let Some(win) = web_sys::window() {
        let _ = win.location().reload();
    }
}

pub(crate) async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    decode(authed(Verb::Get, path, None).await?).await
}

pub(crate) async fn post_json<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, ApiError> {
    decode(authed(Verb::Post, path, Some(body)).await?).await
}

pub(crate) async fn put_json<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, ApiError> {
    decode(authed(Verb::Put, path, Some(body)).await?).await
}

pub(crate) async fn delete(path: &str) -> Result<(), ApiError> {
    authed(Verb::Delete, path, None).await.map(|_| ())
}

/// Unauthenticated POST for the auth endpoints themselves.
pub(crate) async fn post_public<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, ApiError> {
    let resp = send(Verb::Post, path, Some(&body), None).await?;
    let status = resp.status().as_u16();
    if !resp.status().is_success() {
        return Err(ApiError::Http(status));
    }
    decode(resp).await
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::should_retry;

    #[test]
    fn test_retry_only_once_and_only_on_401() {
        assert!(should_retry(401, false));
        assert!(!should_retry(401, true));
        assert!(!should_retry(500, false));
        assert!(!should_retry(403, false));
    }
}
