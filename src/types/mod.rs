mod app_state;
mod identity;
mod task;

pub(crate) use self::app_state::AppState;
pub(crate) use self::identity::{Profile, Subject, User};
pub(crate) use self::task::{Task, TaskTable, TodoView};
