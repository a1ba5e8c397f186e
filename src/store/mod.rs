mod identity;
mod io;
mod tasks;

pub(crate) use self::identity::{load_identities, persist_identities};
pub(crate) use self::io::now_ts;
pub(crate) use self::tasks::{load_tasks, persist_tasks};
