use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::tokens::TokenService;

use super::{Profile, TaskTable, User};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) data_dir: PathBuf,

    pub(crate) tokens: TokenService,

    // Keyed by user id; usernames are unique but looked up by scan.
    pub(crate) users: Arc<RwLock<HashMap<String, User>>>,

    // Keyed by owning user id (1:1).
    pub(crate) profiles: Arc<RwLock<HashMap<String, Profile>>>,

    pub(crate) tasks: Arc<RwLock<TaskTable>>,
}
