use anyhow::{Context, Result};

use crate::types::{Task, TaskTable};

use super::io::write_atomic_overwrite;

// On-disk shape: the task rows plus the id allocator, so ids stay monotonic
// across restarts.
#[derive(serde::Serialize, serde::Deserialize)]
struct TaskFile {
    next_id: i64,
    tasks: Vec<Task>,
}

fn tasks_path(data_dir: &std::path::Path) -> std::path::PathBuf {
    data_dir.join("tasks.json")
}

pub(crate) fn load_tasks(data_dir: &std::path::Path) -> Result<TaskTable> {
    if !tasks_path(data_dir).exists() {
        return Ok(TaskTable::new());
    }

    let bytes = std::fs::read(tasks_path(data_dir)).context("read tasks.json")?;
    let file: TaskFile = serde_json::from_slice(&bytes).context("parse tasks.json")?;

    let rows = file.tasks.into_iter().map(|t| (t.id, t)).collect();
    Ok(TaskTable {
        next_id: file.next_id,
        rows,
    })
}

pub(crate) fn persist_tasks(data_dir: &std::path::Path, table: &TaskTable) -> Result<()> {
    let mut tasks: Vec<Task> = table.rows.values().cloned().collect();
    tasks.sort_by_key(|t| t.id);

    let file = TaskFile {
        next_id: table.next_id,
        tasks,
    };
    let bytes = serde_json::to_vec_pretty(&file).context("serialize tasks")?;
    write_atomic_overwrite(&tasks_path(data_dir), &bytes).context("write tasks.json")?;
    Ok(())
}
