use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::auth::passwords::{DUMMY_PASSWORD_HASH, verify_password};
use crate::auth::tokens::TokenKind;
use crate::http_error::{internal_error, invalid_json, unauthorized};
use crate::types::AppState;

#[derive(Debug, serde::Deserialize)]
pub(crate) struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    access_token: String,
    refresh_token: String,
    access_token_expires_in: i64,
    refresh_token_expires_in: i64,
}

pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, Response> {
    let Json(payload) = payload.map_err(invalid_json)?;

    let user = {
        let users = state.users.read().await;
        users
            .values()
            .find(|u| u.username == payload.username)
            .cloned()
    };

    let Some(user) = user else {
        // Unknown user pays the same verification cost as a wrong password,
        // and gets the same response.
        let _ = verify_password(&payload.password, DUMMY_PASSWORD_HASH);
        tracing::warn!("login failed");
        return Err(unauthorized());
    };

    if !verify_password(&payload.password, &user.password_hash) {
        tracing::warn!("login failed");
        return Err(unauthorized());
    }

    let (access_token, access_token_expires_in) = state
        .tokens
        .issue(&user, TokenKind::Access)
        .map_err(internal_error)?;
    let (refresh_token, refresh_token_expires_in) = state
        .tokens
        .issue(&user, TokenKind::Refresh)
        .map_err(internal_error)?;

    tracing::info!(username = %user.username, "login succeeded");
    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        access_token_expires_in,
        refresh_token_expires_in,
    }))
}
