use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::response::Response;

use crate::http_error::bad_request;
use crate::types::{AppState, Subject, Task, TodoView};
use crate::validators::{DEFAULT_PAGE_SIZE, validate_page_size};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    last_id: Option<i64>,

    #[serde(default, deserialize_with = "empty_as_none")]
    page_size: Option<i64>,
}

// Query binding: an empty parameter value (`?lastId=`) means absent, while a
// genuinely non-numeric value stays an error.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse {
    page_size: i64,
    todos: Vec<TodoView>,
    next_last_id: Option<String>,
}

pub(crate) async fn list_todos(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, Response> {
    let page_size =
        validate_page_size(query.page_size.unwrap_or(DEFAULT_PAGE_SIZE)).map_err(bad_request)?;
    let last_id = query.last_id.unwrap_or(0);

    let tasks = state.tasks.read().await;
    let (page, next_last_id) = page_for_owner(&tasks.rows, &subject.user_id, last_id, page_size);

    Ok(Json(ListResponse {
        page_size,
        todos: page.iter().map(|t| TodoView::from_task(t)).collect(),
        next_last_id: next_last_id.map(|id| id.to_string()),
    }))
}

/// Cursor pagination over the caller's tasks. Ordering and the cursor
/// comparison both use the id, so a short page reliably signals exhaustion
/// and chained calls see every task exactly once.
fn page_for_owner<'a>(
    rows: &'a HashMap<i64, Task>,
    owner: &str,
    last_id: i64,
    page_size: i64,
) -> (Vec<&'a Task>, Option<i64>) {
    let mut page: Vec<&Task> = rows
        .values()
        .filter(|t| t.user_id == owner && t.id > last_id)
        .collect();
    page.sort_by_key(|t| t.id);
    page.truncate(page_size as usize);

    let next_last_id = if (page.len() as i64) < page_size {
        None
    } else {
        page.last().map(|t| t.id)
    };
    (page, next_last_id)
}
