mod create;
mod delete;
mod get;
mod list;
mod update;

pub(crate) use self::create::create_todo;
pub(crate) use self::delete::delete_todo;
pub(crate) use self::get::get_todo;
pub(crate) use self::list::list_todos;
pub(crate) use self::update::update_todo;
