use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::http_error::{
    bad_request, conflict, internal_error, invalid_json, not_found, unauthorized,
};
use crate::store::persist_tasks;
use crate::types::{AppState, Subject, TaskTable};
use crate::validators::validate_title;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTodoRequest {
    id: i64,
    title: String,

    #[serde(default)]
    is_completed: bool,

    // Present in the full-entity payload but never trusted: authorization
    // compares the caller against the stored owner.
    #[serde(default)]
    #[allow(dead_code)]
    user_id: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum UpdateOutcome {
    Applied,
    Missing,
    VersionChanged,
}

pub(crate) async fn update_todo(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<StatusCode, Response> {
    let Json(payload) = payload.map_err(invalid_json)?;

    if payload.id != id {
        return Err(bad_request(anyhow::anyhow!(
            "payload id does not match path id"
        )));
    }
    validate_title(&payload.title).map_err(bad_request)?;

    // Authorize against the stored owner of the current record.
    let expected_version = {
        let tasks = state.tasks.read().await;
        let Some(stored) = tasks.rows.get(&id) else {
            return Err(not_found());
        };
        if stored.user_id != subject.user_id {
            return Err(unauthorized());
        }
        stored.version
    };

    let mut tasks = state.tasks.write().await;
    let prior = tasks.rows.get(&id).cloned();
    match apply_update(
        &mut tasks,
        id,
        expected_version,
        payload.title,
        payload.is_completed,
    ) {
        // Deleted between authorization and write: a benign race, reported
        // as the resource being gone.
        UpdateOutcome::Missing => Err(not_found()),
        UpdateOutcome::VersionChanged => Err(conflict("concurrent modification")),
        UpdateOutcome::Applied => {
            // A failed persist restores the prior row so memory never
            // drifts ahead of disk.
            if let Err(err) = persist_tasks(&state.data_dir, &tasks) {
                if let Some(prior) = prior {
                    tasks.rows.insert(id, prior);
                }
                return Err(internal_error(err));
            }
            tracing::info!(id, username = %subject.username, "todo updated");
            Ok(StatusCode::NO_CONTENT)
        }
    }
}

// Optimistic write: applies only if the row still exists and its version is
// the one the caller was authorized against.
fn apply_update(
    tasks: &mut TaskTable,
    id: i64,
    expected_version: u64,
    title: String,
    is_completed: bool,
) -> UpdateOutcome {
    let Some(stored) = tasks.rows.get_mut(&id) else {
        return UpdateOutcome::Missing;
    };
    if stored.version != expected_version {
        return UpdateOutcome::VersionChanged;
    }

    stored.title = title;
    stored.is_completed = is_completed;
    stored.version += 1;
    UpdateOutcome::Applied
}
