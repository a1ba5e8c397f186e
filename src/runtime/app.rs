use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;

use crate::auth::tokens::{TokenConfig, TokenService};
use crate::store::{load_identities, load_tasks};
use crate::types::AppState;

use super::Args;

pub(super) fn build_state(args: &Args) -> Result<Arc<AppState>> {
    let tokens = TokenService::new(TokenConfig {
        secret: args.jwt_secret.clone(),
        access_ttl_secs: args.access_ttl_secs,
        refresh_ttl_secs: args.refresh_ttl_secs,
    })
    .context("configure token service")?;

    let (users, profiles) = load_identities(&args.data_dir).context("load identities")?;
    let tasks = load_tasks(&args.data_dir).context("load tasks")?;

    Ok(Arc::new(AppState {
        data_dir: args.data_dir.clone(),
        tokens,
        users: Arc::new(RwLock::new(users)),
        profiles: Arc::new(RwLock::new(profiles)),
        tasks: Arc::new(RwLock::new(tasks)),
    }))
}
