use std::sync::Arc;

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::http_error::{internal_error, not_found, unauthorized};
use crate::store::persist_tasks;
use crate::types::{AppState, Subject};

pub(crate) async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Response> {
    let mut tasks = state.tasks.write().await;

    let Some(stored) = tasks.rows.get(&id) else {
        // Also covers deleting an already-deleted id: the second call is a
        // plain 404, never a success.
        return Err(not_found());
    };
    if stored.user_id != subject.user_id {
        return Err(unauthorized());
    }

    let removed = tasks.rows.remove(&id);
    // A failed persist puts the row back so memory never drifts ahead of disk.
    if let Err(err) = persist_tasks(&state.data_dir, &tasks) {
        if let Some(removed) = removed {
            tasks.rows.insert(id, removed);
        }
        return Err(internal_error(err));
    }

    tracing::info!(id, username = %subject.username, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
