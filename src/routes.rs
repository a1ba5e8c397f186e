//! HTTP route registration.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router, middleware};

use crate::auth::require_bearer;
use crate::handlers_auth::{login, refresh, register};
use crate::handlers_todos::{create_todo, delete_todo, get_todo, list_todos, update_todo};
use crate::types::AppState;

pub(crate) fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .merge(todos_router(state.clone()))
        .with_state(state)
}

fn todos_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        // route_layer keeps the middleware off the fallback, so unknown
        // paths still 404 without credentials.
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
