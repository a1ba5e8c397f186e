use std::collections::HashMap;

use crate::store::now_ts;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct Task {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) is_completed: bool,

    // Owning identity; immutable after creation.
    pub(crate) user_id: String,

    // Row version, bumped on every update. Concurrent writers that raced a
    // completed mutation observe a changed version and surface a conflict.
    pub(crate) version: u64,

    pub(crate) created_at: String,
}

/// In-memory task table plus its id allocator. `next_id` is persisted so ids
/// stay monotonic across restarts and are never reused after deletes.
#[derive(Debug)]
pub(crate) struct TaskTable {
    pub(crate) next_id: i64,
    pub(crate) rows: HashMap<i64, Task>,
}

impl TaskTable {
    pub(crate) fn new() -> Self {
        TaskTable {
            next_id: 1,
            rows: HashMap::new(),
        }
    }

    /// Inserts a new task owned by `user_id`. The owner always comes from the
    /// caller's resolved identity, never from request payload fields.
    pub(crate) fn create(&mut self, title: String, is_completed: bool, user_id: &str) -> Task {
        let id = self.next_id;
        self.next_id += 1;

        let task = Task {
            id,
            title,
            is_completed,
            user_id: user_id.to_string(),
            version: 1,
            created_at: now_ts(),
        };
        self.rows.insert(id, task.clone());
        task
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TodoView {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) is_completed: bool,
}

impl TodoView {
    pub(crate) fn from_task(task: &Task) -> Self {
        TodoView {
            id: task.id,
            title: task.title.clone(),
            is_completed: task.is_completed,
        }
    }
}
