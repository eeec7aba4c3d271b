//! Session Lifecycle
//!
//! Login, registration and token refresh. Only `me` is an authenticated
//! call; the rest run without a bearer token.

use serde_json::json;

use crate::models::{TokenPair, UserProfile};
use crate::session;

use super::{get_json, post_public, ApiError};

pub async fn login(username: &str, password: &str) -> Result<TokenPair, ApiError> {
    let tokens: TokenPair = post_public(
        "/api/auth/login/",
        json!({ "username": username, "password": password }),
    )
    .await?;
    session::save_tokens(&tokens);
    Ok(tokens)
}

pub async fn register(username: &str, email: &str, password: &str) -> Result<TokenPair, ApiError> {
    let tokens: TokenPair = post_public(
        "/api/auth/register/",
        json!({ "username": username, "email": email, "password": password }),
    )
    .await?;
    session::save_tokens(&tokens);
    Ok(tokens)
}

pub async fn me() -> Result<UserProfile, ApiError> {
    get_json("/api/auth/me/").await
}

/// One refresh attempt against the stored refresh token. Saves the new pair
/// on success; the caller decides what a failure means.
pub(crate) async fn try_refresh() -> bool {
    let Some(tokens) = session::load_tokens() else {
        return false;
    };
    let refreshed: Result<TokenPair, ApiError> = post_public(
        "/api/auth/refresh/",
        serde_json::json!({ "refresh": tokens.refresh }),
    )
    .await;
    match refreshed {
        Ok(pair) => {
            session::save_tokens(&pair);
            true
        }
        Err(_) => false,
    }
}
