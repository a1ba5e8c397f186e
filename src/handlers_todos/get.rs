use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::response::Response;

use crate::http_error::not_found;
use crate::types::{AppState, Subject, TodoView};

pub(crate) async fn get_todo(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<i64>,
) -> Result<Json<TodoView>, Response> {
    let tasks = state.tasks.read().await;

    // Another user's task and a nonexistent task look identical to the
    // caller, so task ids leak no existence information.
    let task = tasks
        .rows
        .get(&id)
        .filter(|t| t.user_id == subject.user_id)
        .ok_or_else(not_found)?;

    Ok(Json(TodoView::from_task(task)))
}
