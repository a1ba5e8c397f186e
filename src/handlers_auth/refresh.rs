use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;

use crate::auth::tokens::TokenKind;
use crate::http_error::{internal_error, invalid_json, unauthorized};
use crate::types::AppState;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest {
    refresh_token: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshResponse {
    access_token: String,
    access_token_expires_in: i64,
}

/// Exchanges a valid refresh token for a fresh access token. Refresh tokens
/// are not rotated; the one presented stays valid until its own expiry.
pub(crate) async fn refresh(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>, Response> {
    let Json(payload) = payload.map_err(invalid_json)?;

    let Ok(claims) = state.tokens.validate(&payload.refresh_token) else {
        return Err(unauthorized());
    };
    if claims.kind != TokenKind::Refresh {
        return Err(unauthorized());
    }

    let user = {
        let users = state.users.read().await;
        users.get(&claims.uid).cloned()
    };
    let Some(user) = user else {
        return Err(unauthorized());
    };

    let (access_token, access_token_expires_in) = state
        .tokens
        .issue(&user, TokenKind::Access)
        .map_err(internal_error)?;

    Ok(Json(RefreshResponse {
        access_token,
        access_token_expires_in,
    }))
}
