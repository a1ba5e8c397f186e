use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::http_error::unauthorized;
use crate::types::{AppState, Subject};

use super::tokens::TokenKind;

/// Resolves the caller's identity from the `Authorization` header and attaches
/// it as a [`Subject`] extension. Every ownership check downstream builds on
/// this single primitive.
pub(crate) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };

    let Ok(value) = value.to_str() else {
        return unauthorized();
    };

    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };

    let Ok(claims) = state.tokens.validate(token) else {
        return unauthorized();
    };

    // Refresh tokens only mint new access tokens; they never authenticate
    // requests directly.
    if claims.kind != TokenKind::Access {
        return unauthorized();
    }

    // The identity named by the token must still exist.
    let username = {
        let users = state.users.read().await;
        let Some(user) = users.get(&claims.uid) else {
            return unauthorized();
        };
        user.username.clone()
    };

    let mut req = req;
    req.extensions_mut().insert(Subject {
        user_id: claims.uid,
        username,
    });
    next.run(req).await
}
