use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::http_error::{bad_request, internal_error, invalid_json};
use crate::store::persist_tasks;
use crate::types::{AppState, Subject, TodoView};
use crate::validators::validate_title;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTodoRequest {
    title: String,

    #[serde(default)]
    is_completed: bool,
}

pub(crate) async fn create_todo(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(payload) = payload.map_err(invalid_json)?;
    validate_title(&payload.title).map_err(bad_request)?;

    let mut tasks = state.tasks.write().await;
    let prev_next_id = tasks.next_id;
    // Owner comes from the resolved identity; any owner field in the request
    // body is ignored by construction.
    let task = tasks.create(payload.title, payload.is_completed, &subject.user_id);

    // A failed persist undoes the insert so memory never drifts ahead of disk.
    if let Err(err) = persist_tasks(&state.data_dir, &tasks) {
        tasks.rows.remove(&task.id);
        tasks.next_id = prev_next_id;
        return Err(internal_error(err));
    }

    tracing::info!(id = task.id, username = %subject.username, "todo created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/todos/{}", task.id))],
        Json(TodoView::from_task(&task)),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tokio::sync::RwLock;

    use super::*;
    use crate::auth::tokens::{TokenConfig, TokenService};
    use crate::types::TaskTable;

    // Data dir pointing at a regular file, so every persist fails.
    fn state_with_unwritable_data_dir(dir: &std::path::Path) -> Arc<AppState> {
        let blocker = dir.join("data");
        std::fs::write(&blocker, b"").unwrap();
        Arc::new(AppState {
            data_dir: blocker,
            tokens: TokenService::new(TokenConfig {
                secret: "test-secret".to_string(),
                access_ttl_secs: 60,
                refresh_ttl_secs: 120,
            })
            .unwrap(),
            users: Arc::new(RwLock::new(HashMap::new())),
            profiles: Arc::new(RwLock::new(HashMap::new())),
            tasks: Arc::new(RwLock::new(TaskTable::new())),
        })
    }

    #[tokio::test]
    async fn failed_persist_rolls_back_the_insert() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_unwritable_data_dir(dir.path());
        let subject = Subject {
            user_id: "u1".to_string(),
            username: "alice".to_string(),
        };

        let result = create_todo(
            State(state.clone()),
            Extension(subject),
            Ok(Json(CreateTodoRequest {
                title: "doomed".to_string(),
                is_completed: false,
            })),
        )
        .await;
        assert!(result.is_err());

        // Nothing left behind, and the id allocator did not advance.
        let tasks = state.tasks.read().await;
        assert!(tasks.rows.is_empty());
        assert_eq!(tasks.next_id, 1);
    }
}
